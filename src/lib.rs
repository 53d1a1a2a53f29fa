#![cfg_attr(doc, doc = include_str!("../README.md"))]

pub mod auth;
pub mod client;
pub mod codec;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod executor;
pub mod feeds;
pub mod inventory;
pub mod orders;
pub mod products;
pub mod recommendations;
pub mod reports;
pub(crate) mod serde_helpers;
pub mod sellers;
pub mod transport;
pub mod types;

use phf::phf_map;

pub use crate::client::Client;
pub use crate::config::Config;
use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub const MARKETPLACE_ID_VAR: &str = "MWS_MARKETPLACE_ID";
pub const SELLER_ID_VAR: &str = "MWS_SELLER_ID";
pub const ACCESS_KEY_ID_VAR: &str = "MWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "MWS_SECRET_ACCESS_KEY";
pub const AUTH_TOKEN_VAR: &str = "MWS_AUTH_TOKEN";

/// Marketplace id to the MWS region host serving it.
static MARKETPLACES: phf::Map<&'static str, &'static str> = phf_map! {
    // Canada
    "A2EUQ1WTGCTBG2" => "mws.amazonservices.ca",
    // United States
    "ATVPDKIKX0DER" => "mws.amazonservices.com",
    // Mexico
    "A1AM78C64UM0Y8" => "mws.amazonservices.com.mx",
    // Germany, Spain, France, Italy, United Kingdom
    "A1PA6795UKMFR9" => "mws-eu.amazonservices.com",
    "A1RKKUPIHCS9HS" => "mws-eu.amazonservices.com",
    "A13V1IB3VIYZZH" => "mws-eu.amazonservices.com",
    "APJ6JRA9NG5V4" => "mws-eu.amazonservices.com",
    "A1F83G8C2ARO7P" => "mws-eu.amazonservices.com",
    // India
    "A21TJRUUN4KGV" => "mws.amazonservices.in",
    // Japan
    "A1VC38T7YXB528" => "mws.amazonservices.jp",
    // China
    "AAHKV2X7AFYLW" => "mws.amazonservices.com.cn",
    // Australia
    "A39IBJ37TRP1C6" => "mws.amazonservices.com.au",
    // Brazil
    "A2Q3Y263D00KWC" => "mws.amazonservices.com",
};

/// Given a marketplace id, return the MWS host of its region.
#[must_use]
pub fn marketplace_host(marketplace_id: &str) -> Option<&'static str> {
    MARKETPLACES.get(marketplace_id).copied()
}

/// Every known marketplace id served by `host`, sorted.
#[must_use]
pub fn region_marketplaces(host: &str) -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = MARKETPLACES
        .entries()
        .filter(|(_, region)| **region == host)
        .map(|(id, _)| *id)
        .collect();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_for_united_states() {
        assert_eq!(
            marketplace_host("ATVPDKIKX0DER"),
            Some("mws.amazonservices.com")
        );
    }

    #[test]
    fn unknown_marketplace_has_no_host() {
        assert!(marketplace_host("NOPE").is_none());
    }

    #[test]
    fn europe_shares_one_host() {
        let ids = region_marketplaces("mws-eu.amazonservices.com");
        assert_eq!(
            ids,
            vec![
                "A13V1IB3VIYZZH",
                "A1F83G8C2ARO7P",
                "A1PA6795UKMFR9",
                "A1RKKUPIHCS9HS",
                "APJ6JRA9NG5V4",
            ]
        );
    }

    #[test]
    fn brazil_uses_north_america_host() {
        let ids = region_marketplaces("mws.amazonservices.com");
        assert_eq!(ids, vec!["A2Q3Y263D00KWC", "ATVPDKIKX0DER"]);
    }
}

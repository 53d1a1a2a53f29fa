//! Types for the Products API section.

pub mod response;

use serde::{Deserialize, Serialize};

pub use self::response::{
    Category, CompetitivePrice, Images, MatchingProducts, Offer, Parentage, Price,
    PriceAttributes, ProductSummary, SalesRank, SkuPricing,
};

/// Kind of identifier passed to `GetMatchingProductForId`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
#[non_exhaustive]
pub enum IdType {
    #[default]
    Asin,
    Gcid,
    #[serde(rename = "SellerSKU")]
    #[strum(serialize = "SellerSKU")]
    SellerSku,
    Upc,
    Ean,
    Isbn,
    Jan,
}

/// Offer condition filter for the pricing operations.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[non_exhaustive]
pub enum ItemCondition {
    #[default]
    New,
    Used,
    Collectible,
    Refurbished,
    Club,
}

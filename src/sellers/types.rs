use serde::Deserialize;
use serde_with::serde_as;

use crate::serde_helpers::{EmptyAsDefault, Sequence};

/// Result of `ListMarketplaceParticipations`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ParticipationsResult")]
#[non_exhaustive]
pub struct MarketplaceParticipations {
    pub participations: Vec<Participation>,
    pub marketplaces: Vec<Marketplace>,
    pub next_token: Option<String>,
}

#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParticipationsResult {
    #[serde_as(as = "EmptyAsDefault")]
    #[serde(default)]
    list_participations: ParticipationList,
    #[serde_as(as = "EmptyAsDefault")]
    #[serde(default)]
    list_marketplaces: MarketplaceList,
    next_token: Option<String>,
}

#[serde_as]
#[derive(Default, Deserialize)]
struct ParticipationList {
    #[serde_as(as = "Sequence")]
    #[serde(rename = "Participation", default)]
    participation: Vec<Participation>,
}

#[serde_as]
#[derive(Default, Deserialize)]
struct MarketplaceList {
    #[serde_as(as = "Sequence")]
    #[serde(rename = "Marketplace", default)]
    marketplace: Vec<Marketplace>,
}

impl From<ParticipationsResult> for MarketplaceParticipations {
    fn from(result: ParticipationsResult) -> Self {
        Self {
            participations: result.list_participations.participation,
            marketplaces: result.list_marketplaces.marketplace,
            next_token: result.next_token.filter(|token| !token.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct Participation {
    pub marketplace_id: String,
    pub seller_id: Option<String>,
    /// `Yes` or `No`
    pub has_seller_suspended_listings: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct Marketplace {
    pub marketplace_id: String,
    pub name: Option<String>,
    pub default_country_code: Option<String>,
    pub default_currency_code: Option<String>,
    pub default_language_code: Option<String>,
    pub domain_name: Option<String>,
}

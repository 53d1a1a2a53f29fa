use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};

use crate::serde_helpers::{EmptyAsDefault, Sequence};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "SupplyResult")]
#[non_exhaustive]
pub struct InventorySupplyPage {
    pub supply: Vec<InventorySupply>,
    pub next_token: Option<String>,
}

#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SupplyResult {
    #[serde_as(as = "EmptyAsDefault")]
    #[serde(default)]
    inventory_supply_list: Members,
    next_token: Option<String>,
}

#[serde_as]
#[derive(Default, Deserialize)]
struct Members {
    #[serde_as(as = "Sequence")]
    #[serde(default)]
    member: Vec<InventorySupply>,
}

impl From<SupplyResult> for InventorySupplyPage {
    fn from(result: SupplyResult) -> Self {
        Self {
            supply: result.inventory_supply_list.member,
            next_token: result.next_token.filter(|token| !token.is_empty()),
        }
    }
}

/// Fulfillment center supply of one SKU.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct InventorySupply {
    #[serde(rename = "SellerSKU")]
    pub seller_sku: String,
    #[serde(rename = "FNSKU")]
    pub fnsku: Option<String>,
    #[serde(rename = "ASIN")]
    pub asin: Option<String>,
    pub condition: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub total_supply_quantity: Option<u32>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub in_stock_supply_quantity: Option<u32>,
    pub earliest_availability: Option<Timepoint>,
}

/// When supply becomes available: `Immediately`, `DateTime` or `Unknown`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct Timepoint {
    pub timepoint_type: String,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub date_time: Option<DateTime<Utc>>,
}

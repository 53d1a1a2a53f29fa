#![allow(
    clippy::module_name_repetitions,
    reason = "Request suffix is intentional for clarity"
)]

use std::collections::BTreeMap;

use bon::Builder;
use chrono::{DateTime, Utc};

use crate::Result;
use crate::error::Error;
use crate::types::Decimal;

const XML_CONTENT_TYPE: &str = "text/xml; charset=UTF-8";
const FLAT_FILE_CONTENT_TYPE: &str = "text/tab-separated-values; charset=UTF-8";

/// A feed document ready to submit, tagged with how it is encoded.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedContent {
    Xml(String),
    /// Tab-delimited text
    FlatFile(String),
}

impl FeedContent {
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        match self {
            FeedContent::Xml(_) => XML_CONTENT_TYPE,
            FeedContent::FlatFile(_) => FLAT_FILE_CONTENT_TYPE,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            FeedContent::Xml(content) | FeedContent::FlatFile(content) => content,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Builder)]
#[non_exhaustive]
pub struct SubmitFeedOptions {
    /// Replace every existing record of this feed type instead of merging.
    #[builder(default)]
    pub purge_and_replace: bool,
}

/// New stock level of one SKU.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct InventoryUpdate {
    pub sku: String,
    pub quantity: u32,
    /// Days between order and shipment.
    pub fulfillment_latency: Option<u32>,
    /// Generated when absent.
    pub message_id: Option<u32>,
}

/// New standard price, and optionally a sale, for one SKU.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct PriceUpdate {
    pub sku: String,
    pub standard_price: Decimal,
    pub sale: Option<Sale>,
    pub message_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[non_exhaustive]
pub struct Sale {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub sale_price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "UPPERCASE")]
#[non_exhaustive]
pub enum ProductIdType {
    Asin,
    Upc,
    Ean,
}

impl ProductIdType {
    /// Exact length of an id of this type.
    #[must_use]
    pub fn id_length(self) -> usize {
        match self {
            ProductIdType::Asin => 10,
            ProductIdType::Upc => 12,
            ProductIdType::Ean => 13,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum_macros::Display)]
#[non_exhaustive]
pub enum ConditionType {
    #[default]
    New,
    Refurbished,
    UsedLikeNew,
    UsedVeryGood,
    UsedGood,
    UsedAcceptable,
}

/// Columns of the `TemplateType=Offer` flat file, in order.
pub(crate) const FLAT_FILE_HEADER: [&str; 25] = [
    "sku",
    "price",
    "quantity",
    "product-id",
    "product-id-type",
    "condition-type",
    "condition-note",
    "ASIN-hint",
    "title",
    "product-tax-code",
    "operation-type",
    "sale-price",
    "sale-start-date",
    "sale-end-date",
    "leadtime-to-ship",
    "launch-date",
    "is-giftwrap-available",
    "is-gift-message-available",
    "fulfillment-center-id",
    "main-offer-image",
    "offer-image1",
    "offer-image2",
    "offer-image3",
    "offer-image4",
    "offer-image5",
];

const MAX_SKU_LENGTH: usize = 40;
const MAX_PRICE_DIGITS: usize = 18;
const MAX_PRICE_DECIMALS: usize = 2;
const MAX_CONDITION_NOTE_LENGTH: usize = 1000;

/// An offer listing row of the flat-file listings feed.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct Product {
    pub sku: String,
    /// Decimal text; a comma decimal separator is accepted.
    pub price: String,
    #[builder(default)]
    pub quantity: u32,
    pub product_id: String,
    pub product_id_type: ProductIdType,
    #[builder(default)]
    pub condition_type: ConditionType,
    pub condition_note: Option<String>,
}

impl Product {
    /// Problems with this listing, keyed by field name. Empty when the listing is valid.
    #[must_use]
    pub fn errors(&self) -> BTreeMap<&'static str, String> {
        let mut errors = BTreeMap::new();

        let sku_length = self.sku.chars().count();
        if sku_length == 0 || sku_length > MAX_SKU_LENGTH {
            errors.insert(
                "sku",
                format!("should be 1 to {MAX_SKU_LENGTH} characters long"),
            );
        }

        if let Some(problem) = price_problem(&self.price()) {
            errors.insert("price", problem.to_owned());
        }

        let expected = self.product_id_type.id_length();
        if self.product_id.chars().count() != expected {
            errors.insert(
                "product_id",
                format!(
                    "{} should be {expected} characters long",
                    self.product_id_type
                ),
            );
        }

        if self.condition_type != ConditionType::New {
            let note_length = self
                .condition_note
                .as_deref()
                .map_or(0, |note| note.chars().count());
            if note_length == 0 {
                errors.insert(
                    "condition_note",
                    format!("required when condition_type is {}", self.condition_type),
                );
            } else if note_length > MAX_CONDITION_NOTE_LENGTH {
                errors.insert(
                    "condition_note",
                    format!("should not exceed {MAX_CONDITION_NOTE_LENGTH} characters"),
                );
            }
        }

        errors
    }

    /// Whether [`Self::errors`] is empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Fails with a [`crate::error::Kind::Validation`] error listing every problem of this
    /// listing.
    pub fn validate(&self) -> Result<()> {
        match self.problems() {
            Some(problems) => Err(Error::validation(problems)),
            None => Ok(()),
        }
    }

    /// `sku: field problem, field problem`, or `None` when valid.
    pub(crate) fn problems(&self) -> Option<String> {
        let errors = self.errors();
        if errors.is_empty() {
            return None;
        }

        let fields: Vec<String> = errors
            .iter()
            .map(|(field, problem)| format!("{field} {problem}"))
            .collect();
        Some(format!("{}: {}", self.sku, fields.join(", ")))
    }

    /// The price with a `.` decimal separator.
    #[must_use]
    pub fn price(&self) -> String {
        self.price.replace(',', ".")
    }

    /// This listing as a flat-file row, one value per [`FLAT_FILE_HEADER`] column.
    pub(crate) fn to_row(&self) -> Vec<String> {
        let mut row = vec![
            self.sku.clone(),
            self.price(),
            self.quantity.to_string(),
            self.product_id.clone(),
            self.product_id_type.to_string(),
            self.condition_type.to_string(),
            self.condition_note.clone().unwrap_or_default(),
        ];
        row.resize(FLAT_FILE_HEADER.len(), String::new());
        row
    }
}

fn price_problem(price: &str) -> Option<&'static str> {
    let parts: Vec<&str> = price.split('.').collect();
    match parts.as_slice() {
        [whole, decimals] => {
            if whole.chars().count() > MAX_PRICE_DIGITS {
                Some("too high")
            } else if decimals.chars().count() > MAX_PRICE_DECIMALS {
                Some("too many decimals")
            } else {
                None
            }
        }
        _ => Some("should have a whole and a decimal part"),
    }
}

#![allow(
    clippy::module_name_repetitions,
    reason = "Response suffix is intentional for clarity"
)]

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::codec::{ATTRIBUTES_KEY, Value, as_sequence};
use crate::serde_helpers::{Sequence, from_value};
use crate::types::{Decimal, Money};

/// Landed, listing and shipping price of an offer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct Price {
    pub landed_price: Option<Money>,
    pub listing_price: Option<Money>,
    pub shipping: Option<Money>,
}

/// Attributes MWS puts on a `<CompetitivePrice>` element.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct PriceAttributes {
    pub condition: Option<String>,
    pub subcondition: Option<String>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub belongs_to_requester: Option<bool>,
}

/// The competitive price Amazon shows for a product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct CompetitivePrice {
    pub competitive_price_id: Option<String>,
    pub price: Price,
    #[serde(rename = "@attributes", default)]
    pub attributes: PriceAttributes,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct SalesRank {
    pub product_category_id: String,
    #[serde_as(as = "DisplayFromStr")]
    pub rank: u32,
}

/// Competitive price and sales ranks of one of the seller's SKUs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SkuPricing {
    pub price: CompetitivePrice,
    pub sales_ranks: Vec<SalesRank>,
}

/// One of the seller's own offers, as returned by `GetMyPriceForSKU` and `GetMyPriceForASIN`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct Offer {
    pub buying_price: Option<Price>,
    pub regular_price: Option<Money>,
    pub fulfillment_channel: Option<String>,
    pub item_condition: Option<String>,
    pub item_sub_condition: Option<String>,
    pub seller_id: Option<String>,
    #[serde(rename = "SellerSKU")]
    pub seller_sku: Option<String>,
}

/// A node of the product category tree, with its ancestors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct Category {
    pub product_category_id: String,
    pub product_category_name: Option<String>,
    pub parent: Option<Box<Category>>,
}

/// Whether a product is a variation parent or one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
#[non_exhaustive]
pub enum Parentage {
    Parent,
    Child,
}

/// Image URLs derived from the catalog's `SmallImage`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Images {
    pub small: String,
    pub medium: String,
    pub large: String,
}

impl Images {
    /// MWS only returns the 75px rendition; the other sizes differ by URL suffix.
    fn from_small_image(url: &str) -> Self {
        Self {
            small: url.replace("._SL75_", "._SL50_"),
            medium: url.to_owned(),
            large: url.replace("._SL75_", ""),
        }
    }
}

pub(crate) const LANGUAGE_ATTRIBUTE: &str = "xml:lang";

/// The parts of a catalog product `GetMatchingProductForId` callers use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ProductSummary {
    pub asin: Option<String>,
    /// Every text-valued item attribute (`Title`, `Brand`, `Language`, ...).
    pub attributes: BTreeMap<String, String>,
    pub features: Vec<String>,
    pub package_dimensions: BTreeMap<String, Decimal>,
    pub list_price: Option<Money>,
    pub images: Option<Images>,
    pub parentage: Option<Parentage>,
    /// ASIN of the variation parent, for children.
    pub parent_asin: Option<String>,
    pub sales_ranks: Vec<SalesRank>,
}

impl ProductSummary {
    pub(crate) fn from_product(product: &Value) -> Self {
        let mut summary = Self {
            asin: text(product, &["Identifiers", "MarketplaceASIN", "ASIN"]),
            ..Self::default()
        };

        if let Some(item) = product.path(&["AttributeSets", "ItemAttributes"]) {
            summary.read_item_attributes(item);
        }

        if let Some(parent) = text(
            product,
            &["Relationships", "VariationParent", "Identifiers", "MarketplaceASIN", "ASIN"],
        ) {
            summary.parentage = Some(Parentage::Child);
            summary.parent_asin = Some(parent);
        }
        if product.path(&["Relationships", "VariationChild"]).is_some() {
            summary.parentage = Some(Parentage::Parent);
        }

        summary.sales_ranks = product
            .path(&["SalesRankings", "SalesRank"])
            .map(|ranks| sequence(ranks.clone()))
            .unwrap_or_default();

        summary
    }

    fn read_item_attributes(&mut self, item: &Value) {
        let Some(attributes) = item.as_map() else {
            return;
        };

        for (key, value) in attributes.iter() {
            if let Some(text) = value.as_str() {
                self.attributes.insert(key.to_owned(), text.to_owned());
            }
        }
        if let Some(language) = text(item, &[ATTRIBUTES_KEY, LANGUAGE_ATTRIBUTE]) {
            self.attributes.insert("Language".to_owned(), language);
        }

        if let Some(feature) = item.get("Feature") {
            self.features = as_sequence(feature.clone())
                .iter()
                .filter_map(Value::to_text)
                .collect();
        }

        if let Some(dimensions) = item.get("PackageDimensions").and_then(Value::as_map) {
            self.package_dimensions = dimensions
                .iter()
                .filter(|(key, _)| *key != ATTRIBUTES_KEY)
                .filter_map(|(key, value)| {
                    let amount = value.to_text()?.trim().parse::<Decimal>().ok()?;
                    Some((key.to_owned(), amount))
                })
                .collect();
        }

        self.list_price = item
            .get("ListPrice")
            .and_then(|price| from_value::<Money>(price).ok());

        self.images = text(item, &["SmallImage", "URL"]).map(|url| Images::from_small_image(&url));
    }
}

/// Result of `GetMatchingProductForId`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct MatchingProducts {
    /// Requested id to the catalog products matching it
    pub found: BTreeMap<String, Vec<ProductSummary>>,
    /// Requested ids MWS reported without success
    pub not_found: Vec<String>,
}

fn text(value: &Value, keys: &[&str]) -> Option<String> {
    value.path(keys).and_then(Value::to_text)
}

/// Every item of a one-or-many field that deserializes into `T`.
pub(crate) fn sequence<T: serde::de::DeserializeOwned>(value: Value) -> Vec<T> {
    if value.is_empty() {
        return Vec::new();
    }
    as_sequence(value)
        .iter()
        .filter_map(|item| from_value(item).ok())
        .collect()
}

/// Wrapper so the `Offers` element can be read as one or many offers.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub(crate) struct OfferList {
    #[serde_as(as = "Sequence")]
    #[serde(rename = "Offer", default)]
    pub(crate) offers: Vec<Offer>,
}

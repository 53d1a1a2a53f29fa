//! Products API section (`/Products/2011-10-01`).
//!
//! Pricing lookups accept at most [`MAX_PRICING_IDS`] identifiers per call and
//! `GetMatchingProductForId` at most [`MAX_MATCHING_IDS`] distinct ids. Larger batches fail with
//! a [`crate::error::Kind::Validation`] error before anything is sent.

pub mod types;

use std::collections::BTreeMap;

use self::types::response::{LANGUAGE_ATTRIBUTE, OfferList, sequence};
use self::types::{
    Category, CompetitivePrice, IdType, ItemCondition, MatchingProducts, Offer, ProductSummary,
    SkuPricing,
};
use crate::Result;
use crate::codec::{ATTRIBUTES_KEY, Map, Value, as_sequence, from_xml};
use crate::error::Error;
use crate::executor::{Executor, Params};
use crate::serde_helpers::from_value;

pub const MAX_PRICING_IDS: usize = 20;
pub const MAX_MATCHING_IDS: usize = 5;

const SUCCESS: &str = "Success";

#[derive(Clone, Copy, Debug)]
pub struct Products<'client> {
    executor: &'client Executor,
}

impl<'client> Products<'client> {
    pub(crate) fn new(executor: &'client Executor) -> Self {
        Self { executor }
    }

    /// Competitive price per ASIN; ASINs without one are left out.
    pub async fn competitive_pricing_for_asin<S: AsRef<str>>(
        &self,
        asins: &[S],
    ) -> Result<BTreeMap<String, CompetitivePrice>> {
        check_limit(asins.len(), MAX_PRICING_IDS, "ASINs")?;

        let mut params = Params::new();
        params.set_list("ASINList.ASIN", asins.iter().map(AsRef::as_ref));

        let mut prices = BTreeMap::new();
        for result in self.results("GetCompetitivePricingForASIN", params).await? {
            let asin = text(&result, &["Product", "Identifiers", "MarketplaceASIN", "ASIN"]);
            if let (Some(asin), Some(price)) = (asin, competitive_price(&result)) {
                prices.insert(asin, price);
            }
        }

        Ok(prices)
    }

    /// Competitive price and sales ranks per SKU; SKUs without a competitive price are left out.
    pub async fn competitive_pricing_for_sku<S: AsRef<str>>(
        &self,
        skus: &[S],
    ) -> Result<BTreeMap<String, SkuPricing>> {
        check_limit(skus.len(), MAX_PRICING_IDS, "SKUs")?;

        let mut params = Params::new();
        params.set_list("SellerSKUList.SellerSKU", skus.iter().map(AsRef::as_ref));

        let mut pricing = BTreeMap::new();
        for result in self.results("GetCompetitivePricingForSKU", params).await? {
            let Some(price) = competitive_price(&result) else {
                continue;
            };
            let Some(sku) = text(&result, &["Product", "Identifiers", "SKUIdentifier", "SellerSKU"])
            else {
                continue;
            };

            let sales_ranks = result
                .path(&["Product", "SalesRankings", "SalesRank"])
                .map(|ranks| sequence(ranks.clone()))
                .unwrap_or_default();

            pricing.insert(sku, SkuPricing { price, sales_ranks });
        }

        Ok(pricing)
    }

    /// The lowest priced offers for one ASIN, as decoded.
    pub async fn lowest_priced_offers_for_asin(
        &self,
        asin: &str,
        condition: ItemCondition,
    ) -> Result<Value> {
        let mut params = Params::new();
        params
            .set("ASIN", asin)
            .set("ItemCondition", condition.to_string());

        self.value("GetLowestPricedOffersForASIN", params).await
    }

    pub async fn lowest_priced_offers_for_sku(
        &self,
        sku: &str,
        condition: ItemCondition,
    ) -> Result<Value> {
        let mut params = Params::new();
        params
            .set("SellerSKU", sku)
            .set("ItemCondition", condition.to_string());

        self.value("GetLowestPricedOffersForSKU", params).await
    }

    /// The seller's own offers per SKU; `None` for SKUs MWS could not resolve.
    pub async fn my_price_for_sku<S: AsRef<str>>(
        &self,
        skus: &[S],
        condition: Option<ItemCondition>,
    ) -> Result<BTreeMap<String, Option<Vec<Offer>>>> {
        self.my_price("GetMyPriceForSKU", "SellerSKUList.SellerSKU", "SellerSKU", skus, condition)
            .await
    }

    /// The seller's own offers per ASIN; `None` for ASINs MWS could not resolve.
    pub async fn my_price_for_asin<S: AsRef<str>>(
        &self,
        asins: &[S],
        condition: Option<ItemCondition>,
    ) -> Result<BTreeMap<String, Option<Vec<Offer>>>> {
        self.my_price("GetMyPriceForASIN", "ASINList.ASIN", "ASIN", asins, condition)
            .await
    }

    pub async fn lowest_offer_listings_for_asin<S: AsRef<str>>(
        &self,
        asins: &[S],
        condition: Option<ItemCondition>,
    ) -> Result<BTreeMap<String, Vec<Value>>> {
        check_limit(asins.len(), MAX_PRICING_IDS, "ASINs")?;

        let mut params = Params::new();
        params
            .set_list("ASINList.ASIN", asins.iter().map(AsRef::as_ref))
            .maybe_set("ItemCondition", condition.map(|c| c.to_string()));

        let mut listings = BTreeMap::new();
        for result in self.results("GetLowestOfferListingsForASIN", params).await? {
            let Some(asin) = text(&result, &["Product", "Identifiers", "MarketplaceASIN", "ASIN"])
            else {
                continue;
            };
            let offers = result
                .path(&["Product", "LowestOfferListings", "LowestOfferListing"])
                .filter(|offers| !offers.is_empty())
                .map(|offers| as_sequence(offers.clone()))
                .unwrap_or_default();

            listings.insert(asin, offers);
        }

        Ok(listings)
    }

    pub async fn product_categories_for_sku(&self, sku: &str) -> Result<Option<Category>> {
        let mut params = Params::new();
        params.set("SellerSKU", sku);

        self.categories("GetProductCategoriesForSKU", params).await
    }

    pub async fn product_categories_for_asin(&self, asin: &str) -> Result<Option<Category>> {
        let mut params = Params::new();
        params.set("ASIN", asin);

        self.categories("GetProductCategoriesForASIN", params).await
    }

    /// Catalog products matching each id. Duplicate ids are sent once.
    pub async fn matching_product_for_id<S: AsRef<str>>(
        &self,
        ids: &[S],
        id_type: IdType,
    ) -> Result<MatchingProducts> {
        let mut unique: Vec<&str> = Vec::with_capacity(ids.len());
        for id in ids.iter().map(AsRef::as_ref) {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        check_limit(unique.len(), MAX_MATCHING_IDS, "ids")?;

        let mut params = Params::new();
        params
            .set("IdType", id_type.to_string())
            .set_list("IdList.Id", unique);

        let body = self
            .executor
            .execute_raw("GetMatchingProductForId", params, None)
            .await?;
        let decoded = from_xml(&body)?;

        let mut matching = MatchingProducts::default();
        let Some(results) = decoded
            .get("GetMatchingProductForIdResult")
            .filter(|results| !results.is_empty())
        else {
            return Ok(matching);
        };

        for result in as_sequence(results.clone()) {
            let Some(id) = text(&result, &[ATTRIBUTES_KEY, "Id"]) else {
                continue;
            };
            if text(&result, &[ATTRIBUTES_KEY, "status"]).as_deref() != Some(SUCCESS) {
                matching.not_found.push(id);
                continue;
            }

            let products = result
                .path(&["Products", "Product"])
                .filter(|products| !products.is_empty())
                .map(|products| as_sequence(products.clone()))
                .unwrap_or_default();

            matching
                .found
                .entry(id)
                .or_default()
                .extend(products.iter().map(ProductSummary::from_product));
        }

        Ok(matching)
    }

    /// Catalog search; each `ItemAttributes@xml:lang` is surfaced as a `Language` child.
    pub async fn list_matching_products(
        &self,
        query: &str,
        query_context_id: Option<&str>,
    ) -> Result<Value> {
        if query.trim().is_empty() {
            return Err(Error::validation("missing query"));
        }

        let mut params = Params::new();
        params
            .set("Query", query)
            .maybe_set("QueryContextId", query_context_id);

        let mut value = self.value("ListMatchingProducts", params).await?;
        promote_language(&mut value);
        Ok(value)
    }

    async fn value(&self, operation: &str, params: Params) -> Result<Value> {
        Ok(self
            .executor
            .execute(operation, params, None)
            .await?
            .into_value())
    }

    /// Per-id results of a batch operation, one or many.
    async fn results(&self, operation: &str, params: Params) -> Result<Vec<Value>> {
        let value = self.value(operation, params).await?;
        if value.is_empty() {
            return Ok(Vec::new());
        }
        Ok(as_sequence(value))
    }

    async fn my_price<S: AsRef<str>>(
        &self,
        operation: &str,
        list_prefix: &str,
        id_attribute: &str,
        ids: &[S],
        condition: Option<ItemCondition>,
    ) -> Result<BTreeMap<String, Option<Vec<Offer>>>> {
        check_limit(ids.len(), MAX_PRICING_IDS, "ids")?;

        let mut params = Params::new();
        params
            .set_list(list_prefix, ids.iter().map(AsRef::as_ref))
            .maybe_set("ItemCondition", condition.map(|c| c.to_string()));

        let mut prices = BTreeMap::new();
        for result in self.results(operation, params).await? {
            let Some(id) = text(&result, &[ATTRIBUTES_KEY, id_attribute]) else {
                continue;
            };
            if text(&result, &[ATTRIBUTES_KEY, "status"]).as_deref() != Some(SUCCESS) {
                prices.insert(id, None);
                continue;
            }

            let offers = match result.path(&["Product", "Offers"]) {
                Some(offers) if !offers.is_empty() => from_value::<OfferList>(offers)?.offers,
                _ => Vec::new(),
            };
            prices.insert(id, Some(offers));
        }

        Ok(prices)
    }

    async fn categories(&self, operation: &str, params: Params) -> Result<Option<Category>> {
        let value = self.value(operation, params).await?;

        match value.get("Self") {
            Some(category) if !category.is_empty() => as_sequence(category.clone())
                .first()
                .map(from_value::<Category>)
                .transpose(),
            _ => Ok(None),
        }
    }
}

fn check_limit(count: usize, max: usize, what: &str) -> Result<()> {
    if count > max {
        return Err(Error::validation(format!(
            "at most {max} {what} per call, got {count}"
        )));
    }
    Ok(())
}

fn text(value: &Value, keys: &[&str]) -> Option<String> {
    value.path(keys).and_then(Value::to_text)
}

/// First competitive price of a pricing result.
fn competitive_price(result: &Value) -> Option<CompetitivePrice> {
    let prices = result.path(&[
        "Product",
        "CompetitivePricing",
        "CompetitivePrices",
        "CompetitivePrice",
    ])?;
    sequence(prices.clone()).into_iter().next()
}

/// Rewrites `ItemAttributes@xml:lang` into a `Language` child, anywhere in `value`.
fn promote_language(value: &mut Value) {
    match value {
        Value::Map(map) => {
            match map.get_mut("ItemAttributes") {
                Some(Value::Map(item)) => promote_item_language(item),
                Some(Value::List(items)) => {
                    for item in items {
                        if let Value::Map(item) = item {
                            promote_item_language(item);
                        }
                    }
                }
                _ => {}
            }
            map.values_mut().for_each(promote_language);
        }
        Value::List(items) => items.iter_mut().for_each(promote_language),
        _ => {}
    }
}

fn promote_item_language(item: &mut Map) {
    let language = match item.get_mut(ATTRIBUTES_KEY) {
        Some(Value::Map(attributes)) => attributes.remove(LANGUAGE_ATTRIBUTE),
        _ => None,
    };
    if item.get(ATTRIBUTES_KEY).is_some_and(Value::is_empty) {
        item.remove(ATTRIBUTES_KEY);
    }
    if let Some(language) = language {
        item.insert("Language", language);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_inclusive() {
        assert!(check_limit(20, MAX_PRICING_IDS, "ASINs").is_ok(), "twenty allowed");

        let err = check_limit(21, MAX_PRICING_IDS, "ASINs").unwrap_err();
        assert_eq!(err.kind(), crate::error::Kind::Validation);
        assert!(err.to_string().contains("at most 20 ASINs"), "{err}");
    }

    #[test]
    fn language_becomes_a_child() -> Result<()> {
        let mut value = from_xml(
            r#"<ListMatchingProductsResult><Products><Product><AttributeSets>
<ns2:ItemAttributes xml:lang="de-DE"><ns2:Title>Buch</ns2:Title></ns2:ItemAttributes>
</AttributeSets></Product></Products></ListMatchingProductsResult>"#,
        )?;

        promote_language(&mut value);

        let item = value
            .path(&["Products", "Product", "AttributeSets", "ItemAttributes"])
            .unwrap();
        assert_eq!(item.get("Language").and_then(Value::as_str), Some("de-DE"));
        assert_eq!(item.get("Title").and_then(Value::as_str), Some("Buch"));
        assert!(item.get(ATTRIBUTES_KEY).is_none(), "attribute removed");
        Ok(())
    }

    #[test]
    fn language_is_promoted_in_every_attribute_set() -> Result<()> {
        let mut value = from_xml(
            r#"<GetMatchingProductResult><Product><AttributeSets>
<ns2:ItemAttributes xml:lang="de-DE"><ns2:Title>Buch</ns2:Title></ns2:ItemAttributes>
<ns2:ItemAttributes xml:lang="en-GB"><ns2:Title>Book</ns2:Title></ns2:ItemAttributes>
</AttributeSets></Product></GetMatchingProductResult>"#,
        )?;

        promote_language(&mut value);

        let sets = value
            .path(&["Product", "AttributeSets", "ItemAttributes"])
            .and_then(Value::as_list)
            .unwrap();
        let languages: Vec<_> = sets
            .iter()
            .map(|set| set.get("Language").and_then(Value::as_str))
            .collect();
        assert_eq!(languages, vec![Some("de-DE"), Some("en-GB")]);
        assert!(
            sets.iter().all(|set| set.get(ATTRIBUTES_KEY).is_none()),
            "attributes removed"
        );
        Ok(())
    }
}

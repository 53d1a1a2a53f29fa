//! Feeds API section (`/`, version `2009-01-01`).
//!
//! Structured feeds are XML `AmazonEnvelope` documents built from [`Value`] trees: a `Header`
//! naming the seller, a `MessageType` and one `Message` per record, each with its own
//! `MessageID`. Listings go out as a tab-delimited flat file instead.
//!
//! # Example
//!
//! ```no_run
//! use amazon_mws_client::Client;
//! use amazon_mws_client::feeds::types::InventoryUpdate;
//!
//! # async fn example(client: Client) -> amazon_mws_client::Result<()> {
//! let info = client.feeds().update_stock(&[("sku-1", 5), ("sku-2", 0)]).await?;
//! println!("submitted {}", info.feed_submission_id);
//!
//! let update = InventoryUpdate::builder().sku("sku-3").quantity(2).fulfillment_latency(3).build();
//! client.feeds().update_stock_with_fulfillment_latency(&[update]).await?;
//! # Ok(())
//! # }
//! ```

pub mod types;

use self::types::request::FLAT_FILE_HEADER;
use self::types::{
    FLAT_FILE_LISTINGS_DATA, FeedContent, FeedSubmissionInfo, FeedSubmissionPage,
    INVENTORY_AVAILABILITY_DATA, InventoryUpdate, PRODUCT_DATA, PRODUCT_PRICING_DATA,
    PriceUpdate, Product, SubmitFeedOptions,
};
use crate::Result;
use crate::codec::{Attributed, Map, Value, to_xml};
use crate::error::Error;
use crate::executor::{Body, Executor, Params, TIMESTAMP_FORMAT};
use crate::serde_helpers::from_value;

const DOCUMENT_VERSION: &str = "1.01";
const DEFAULT_CURRENCY: &str = "DEFAULT";
const FLAT_FILE_TEMPLATE: [&str; 2] = ["TemplateType=Offer", "Version=2014.0703"];

#[derive(Clone, Copy, Debug)]
pub struct Feeds<'client> {
    executor: &'client Executor,
}

impl<'client> Feeds<'client> {
    pub(crate) fn new(executor: &'client Executor) -> Self {
        Self { executor }
    }

    /// Uploads `content` as a feed of `feed_type`, e.g. [`types::PRODUCT_DATA`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self, content), fields(bytes = content.as_str().len()))
    )]
    pub async fn submit_feed(
        &self,
        feed_type: &str,
        content: FeedContent,
        options: &SubmitFeedOptions,
    ) -> Result<FeedSubmissionInfo> {
        let credentials = self.executor.config().credentials();

        let mut params = Params::new();
        params
            .set("FeedType", feed_type)
            .set("PurgeAndReplace", options.purge_and_replace.to_string())
            .set("Merchant", credentials.seller_id());

        let content_type = content.content_type();
        let body = match content {
            FeedContent::Xml(content) | FeedContent::FlatFile(content) => {
                Body::new(content, content_type)
            }
        };

        let result = self
            .executor
            .execute("SubmitFeed", params, Some(body))
            .await?
            .into_value();

        match result.get("FeedSubmissionInfo") {
            Some(info) => from_value(info),
            None => Err(Error::unexpected_response(
                "SubmitFeed response has no FeedSubmissionInfo",
            )),
        }
    }

    /// Renders the XML envelope a structured feed would carry, without sending anything.
    pub fn envelope(&self, message_type: &str, messages: Vec<Value>) -> Result<String> {
        let mut header = Map::new();
        header
            .insert("DocumentVersion", DOCUMENT_VERSION)
            .insert(
                "MerchantIdentifier",
                self.executor.config().credentials().seller_id(),
            );

        let mut document = Map::new();
        document
            .insert("Header", header)
            .insert("MessageType", message_type)
            .insert("Message", messages);

        to_xml(&Value::Map(document))
    }

    /// Sets the stock quantity of each `(sku, quantity)` pair.
    pub async fn update_stock<S: AsRef<str>>(
        &self,
        stock: &[(S, u32)],
    ) -> Result<FeedSubmissionInfo> {
        let updates: Vec<InventoryUpdate> = stock
            .iter()
            .map(|(sku, quantity)| {
                InventoryUpdate::builder()
                    .sku(sku.as_ref())
                    .quantity(*quantity)
                    .build()
            })
            .collect();

        self.update_stock_with_fulfillment_latency(&updates).await
    }

    /// Sets stock quantities, and the fulfillment latency of updates that carry one.
    pub async fn update_stock_with_fulfillment_latency(
        &self,
        updates: &[InventoryUpdate],
    ) -> Result<FeedSubmissionInfo> {
        let messages = updates
            .iter()
            .map(|update| {
                let mut inventory = Map::new();
                inventory
                    .insert("SKU", update.sku.as_str())
                    .insert("Quantity", update.quantity);
                if let Some(latency) = update.fulfillment_latency {
                    inventory.insert("FulfillmentLatency", latency);
                }

                let mut message = self.message(update.message_id);
                message
                    .insert("OperationType", "Update")
                    .insert("Inventory", inventory);
                Value::Map(message)
            })
            .collect();

        self.submit_envelope(INVENTORY_AVAILABILITY_DATA, "Inventory", messages)
            .await
    }

    /// Sets standard prices, and sale prices for updates that carry a sale.
    pub async fn update_price(&self, updates: &[PriceUpdate]) -> Result<FeedSubmissionInfo> {
        let messages = updates
            .iter()
            .map(|update| {
                let mut price = Map::new();
                price
                    .insert("SKU", update.sku.as_str())
                    .insert("StandardPrice", currency(&update.standard_price.to_string()));

                if let Some(sale) = &update.sale {
                    let mut sale_value = Map::new();
                    sale_value
                        .insert(
                            "StartDate",
                            sale.start_date.format(TIMESTAMP_FORMAT).to_string(),
                        )
                        .insert("EndDate", sale.end_date.format(TIMESTAMP_FORMAT).to_string())
                        .insert("SalePrice", currency(&sale.sale_price.to_string()));
                    price.insert("Sale", sale_value);
                }

                let mut message = self.message(update.message_id);
                message.insert("Price", price);
                Value::Map(message)
            })
            .collect();

        self.submit_envelope(PRODUCT_PRICING_DATA, "Price", messages)
            .await
    }

    /// Removes the products with these SKUs from the catalog.
    pub async fn delete_products_by_sku<S: AsRef<str>>(
        &self,
        skus: &[S],
    ) -> Result<FeedSubmissionInfo> {
        let messages = skus
            .iter()
            .map(|sku| {
                let mut product = Map::new();
                product.insert("SKU", sku.as_ref());

                let mut message = self.message(None);
                message
                    .insert("OperationType", "Delete")
                    .insert("Product", product);
                Value::Map(message)
            })
            .collect();

        self.submit_envelope(PRODUCT_DATA, "Product", messages).await
    }

    /// Creates or updates offer listings through the flat-file listings feed.
    ///
    /// Every product is validated first; any invalid product fails the call with a
    /// [`crate::error::Kind::Validation`] error before anything is sent.
    pub async fn post_products(&self, products: &[Product]) -> Result<FeedSubmissionInfo> {
        let problems: Vec<String> = products.iter().filter_map(Product::problems).collect();
        if !problems.is_empty() {
            return Err(Error::validation(problems.join("; ")));
        }

        self.submit_feed(
            FLAT_FILE_LISTINGS_DATA,
            FeedContent::FlatFile(flat_file(products)),
            &SubmitFeedOptions::default(),
        )
        .await
    }

    /// The processing report of a submission, or the whole result document when it has none.
    pub async fn feed_submission_result(&self, feed_submission_id: &str) -> Result<Value> {
        let mut params = Params::new();
        params.set("FeedSubmissionId", feed_submission_id);

        let mut result = self
            .executor
            .execute("GetFeedSubmissionResult", params, None)
            .await?
            .into_value();

        let report = match &mut result {
            Value::Map(map) => match map.get_mut("Message") {
                Some(Value::Map(message)) => message.remove("ProcessingReport"),
                _ => None,
            },
            _ => None,
        };

        Ok(report.unwrap_or(result))
    }

    /// Feed submissions of the previous 90 days.
    pub async fn feed_submission_list(&self) -> Result<FeedSubmissionPage> {
        self.executor
            .call("GetFeedSubmissionList", Params::new())
            .await
    }

    async fn submit_envelope(
        &self,
        feed_type: &str,
        message_type: &str,
        messages: Vec<Value>,
    ) -> Result<FeedSubmissionInfo> {
        let xml = self.envelope(message_type, messages)?;
        self.submit_feed(feed_type, FeedContent::Xml(xml), &SubmitFeedOptions::default())
            .await
    }

    fn message(&self, message_id: Option<u32>) -> Map {
        let id = message_id.unwrap_or_else(|| self.executor.config().message_id());

        let mut message = Map::new();
        message.insert("MessageID", id);
        message
    }
}

fn currency(amount: &str) -> Attributed {
    Attributed::new(amount).with_attribute("currency", DEFAULT_CURRENCY)
}

/// The listings flat file: template line, the header twice, then one row per product.
fn flat_file(products: &[Product]) -> String {
    let mut lines = vec![
        tsv_line(FLAT_FILE_TEMPLATE),
        tsv_line(FLAT_FILE_HEADER),
        tsv_line(FLAT_FILE_HEADER),
    ];
    lines.extend(products.iter().map(|product| tsv_line(product.to_row())));

    let mut file = lines.join("\n");
    file.push('\n');
    file
}

fn tsv_line<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .map(|cell| cell.as_ref().replace(['\t', '\r', '\n'], " "))
        .collect::<Vec<_>>()
        .join("\t")
}

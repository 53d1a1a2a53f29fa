//! Feeds example: prints an inventory envelope, submits it and polls the submission list.
//!
//! Reads the `MWS_*` credential variables. Run with tracing enabled:
//! ```sh
//! RUST_LOG=info,hyper_util=off,hyper=off,reqwest=off,h2=off,rustls=off cargo run --example inventory_feed --features tracing -- SKU-1=5 SKU-2=0
//! ```

use amazon_mws_client::auth::Credentials;
use amazon_mws_client::codec::{Map, Value};
use amazon_mws_client::{Client, Config};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// `sku=quantity` arguments.
fn stock_from_args() -> anyhow::Result<Vec<(String, u32)>> {
    std::env::args()
        .skip(1)
        .map(|arg| {
            let (sku, quantity) = arg
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("expected sku=quantity, got {arg}"))?;
            Ok((sku.to_owned(), quantity.parse()?))
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let stock = stock_from_args()?;
    let client = Client::new(Config::builder().credentials(Credentials::from_env()?).build())?;
    let feeds = client.feeds();

    let preview: Vec<Value> = stock
        .iter()
        .map(|(sku, quantity)| {
            let mut inventory = Map::new();
            inventory.insert("SKU", sku).insert("Quantity", *quantity);
            let mut message = Map::new();
            message.insert("Inventory", inventory);
            Value::Map(message)
        })
        .collect();
    let envelope = feeds.envelope("Inventory", preview)?;
    info!(%envelope, "rendered inventory feed");

    match feeds.update_stock(&stock).await {
        Ok(info) => info!(
            endpoint = "update_stock",
            feed_submission_id = %info.feed_submission_id,
            status = ?info.feed_processing_status
        ),
        Err(e) => debug!(endpoint = "update_stock", error = %e),
    }

    match feeds.feed_submission_list().await {
        Ok(page) => {
            for submission in &page.submissions {
                info!(
                    endpoint = "feed_submission_list",
                    feed_submission_id = %submission.feed_submission_id,
                    feed_type = ?submission.feed_type,
                    status = ?submission.feed_processing_status
                );
            }
        }
        Err(e) => debug!(endpoint = "feed_submission_list", error = %e),
    }

    Ok(())
}

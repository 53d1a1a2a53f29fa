//! Orders example: checks the credentials, then walks every unshipped order of the last week
//! and lists its items.
//!
//! Reads the `MWS_*` credential variables. Run with tracing enabled:
//! ```sh
//! RUST_LOG=info,hyper_util=off,hyper=off,reqwest=off,h2=off,rustls=off cargo run --example orders --features tracing
//! ```
//!
//! Optionally log to a file:
//! ```sh
//! LOG_FILE=orders.log RUST_LOG=info,hyper_util=off,hyper=off,reqwest=off,h2=off,rustls=off cargo run --example orders --features tracing
//! ```

use std::fs::File;

use amazon_mws_client::auth::Credentials;
use amazon_mws_client::orders::types::ListOrdersRequest;
use amazon_mws_client::{Client, Config};
use chrono::{Duration, Utc};
use futures::StreamExt as _;
use tokio::pin;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(path) = std::env::var("LOG_FILE") {
        let file = File::create(path)?;
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let config = Config::builder()
        .credentials(Credentials::from_env()?)
        .application_name("OrdersDemo")
        .application_version(env!("CARGO_PKG_VERSION"))
        .build();
    let client = Client::new(config)?;

    if !client.validate_credentials().await? {
        warn!(endpoint = "validate_credentials", "credentials were refused");
        return Ok(());
    }
    info!(endpoint = "validate_credentials", region = client.region_host());

    let request = ListOrdersRequest::builder()
        .created_after(Utc::now() - Duration::days(7))
        .build();

    let orders = client.orders();
    let stream = orders.stream_orders(&request);
    pin!(stream);

    while let Some(result) = stream.next().await {
        let order = match result {
            Ok(order) => order,
            Err(e) => {
                debug!(endpoint = "stream_orders", error = %e);
                break;
            }
        };

        info!(
            endpoint = "stream_orders",
            order_id = %order.amazon_order_id,
            status = ?order.order_status,
            total = ?order.order_total.as_ref().map(|total| total.amount)
        );

        match orders.list_order_items(&order.amazon_order_id).await {
            Ok(page) => {
                for item in &page.items {
                    info!(
                        endpoint = "list_order_items",
                        order_id = %order.amazon_order_id,
                        sku = ?item.seller_sku,
                        quantity = ?item.quantity_ordered
                    );
                }
            }
            Err(e) => debug!(endpoint = "list_order_items", error = %e),
        }
    }

    Ok(())
}

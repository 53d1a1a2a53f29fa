//! The MWS client and its per-section handles.
//!
//! # Example
//!
//! ```no_run
//! use amazon_mws_client::auth::Credentials;
//! use amazon_mws_client::orders::types::ListOrdersRequest;
//! use amazon_mws_client::types::{DateTime, Utc};
//! use amazon_mws_client::{Client, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::builder()
//!     .credentials(Credentials::from_env()?)
//!     .build();
//! let client = Client::new(config)?;
//!
//! let request = ListOrdersRequest::builder()
//!     .created_after("2024-01-01T00:00:00Z".parse::<DateTime<Utc>>()?)
//!     .build();
//! let page = client.orders().list_orders(&request).await?;
//! for order in page.orders {
//!     println!("{}: {:?}", order.amazon_order_id, order.order_status);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::Result;
use crate::config::Config;
use crate::error::Kind;
use crate::executor::{Body, Executor, Params, Payload};
use crate::feeds::Feeds;
use crate::inventory::Inventory;
use crate::orders::Orders;
use crate::products::Products;
use crate::recommendations::Recommendations;
use crate::reports::Reports;
use crate::sellers::Sellers;
use crate::transport::{Transport, default_transport};

/// Message MWS answers with when credentials are good but the probe order id is not.
const VALIDATION_PROBE_MESSAGE: &str = "Invalid AmazonOrderId: validate";

/// Client for one seller account in one marketplace.
///
/// Cheap to clone; clones share the configuration and the transport.
#[derive(Clone, Debug)]
pub struct Client {
    inner: Arc<Executor>,
}

impl Client {
    /// Validates `config` and builds a client on the default `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns a [`Kind::Configuration`] error if a credential field is empty or the marketplace
    /// id is unknown.
    pub fn new(config: Config) -> Result<Self> {
        let transport = default_transport(&config)?;
        Self::with_transport(config, transport)
    }

    /// Like [`Client::new`] but sends every request through `transport`.
    pub fn with_transport<T: Transport + 'static>(config: Config, transport: T) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(Executor::new(config, Arc::new(transport))?),
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        self.inner.config()
    }

    /// Host the configured marketplace belongs to, e.g. `mws.amazonservices.com`.
    #[must_use]
    pub fn region_host(&self) -> &'static str {
        self.inner.region_host()
    }

    #[must_use]
    pub fn executor(&self) -> &Executor {
        &self.inner
    }

    /// Calls any cataloged operation and unwraps its response envelope.
    pub async fn execute(
        &self,
        operation: &str,
        params: Params,
        body: Option<Body>,
    ) -> Result<Payload> {
        self.inner.execute(operation, params, body).await
    }

    /// Calls any cataloged operation and returns the body untouched.
    pub async fn execute_raw(
        &self,
        operation: &str,
        params: Params,
        body: Option<Body>,
    ) -> Result<String> {
        self.inner.execute_raw(operation, params, body).await
    }

    #[must_use]
    pub fn orders(&self) -> Orders<'_> {
        Orders::new(&self.inner)
    }

    #[must_use]
    pub fn products(&self) -> Products<'_> {
        Products::new(&self.inner)
    }

    #[must_use]
    pub fn feeds(&self) -> Feeds<'_> {
        Feeds::new(&self.inner)
    }

    #[must_use]
    pub fn reports(&self) -> Reports<'_> {
        Reports::new(&self.inner)
    }

    #[must_use]
    pub fn sellers(&self) -> Sellers<'_> {
        Sellers::new(&self.inner)
    }

    #[must_use]
    pub fn recommendations(&self) -> Recommendations<'_> {
        Recommendations::new(&self.inner)
    }

    #[must_use]
    pub fn inventory(&self) -> Inventory<'_> {
        Inventory::new(&self.inner)
    }

    /// Probes the credentials with a `ListOrderItems` call for the order id `validate`.
    ///
    /// Valid credentials make MWS reject the order id rather than the signature. Any other
    /// remote error means the credentials were refused; transport failures are returned as is.
    pub async fn validate_credentials(&self) -> Result<bool> {
        let mut params = Params::new();
        params.set("AmazonOrderId", "validate");

        match self.inner.execute("ListOrderItems", params, None).await {
            Ok(_) => Ok(false),
            Err(err) if err.kind() == Kind::Status => Ok(err
                .as_status()
                .is_some_and(|status| status.message == VALIDATION_PROBE_MESSAGE)),
            Err(err) => Err(err),
        }
    }
}

//! Client configuration.

use std::time::Duration;

use bon::Builder;
use rand::Rng as _;

use crate::auth::Credentials;
use crate::types::{DateTime, Utc};

pub const DEFAULT_APPLICATION_NAME: &str = "AmazonMWS/Client";
pub const DEFAULT_APPLICATION_VERSION: &str = "0.0.*";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Immutable settings shared by every call a [`crate::Client`] makes.
///
/// # Example
///
/// ```
/// use amazon_mws_client::Config;
/// use amazon_mws_client::auth::Credentials;
///
/// let credentials = Credentials::builder()
///     .marketplace_id("ATVPDKIKX0DER")
///     .seller_id("A3SELLER")
///     .access_key_id("AKIAEXAMPLE")
///     .secret_access_key("secret")
///     .build();
///
/// let config = Config::builder()
///     .credentials(credentials)
///     .application_version("1.2.0")
///     .build();
/// ```
#[non_exhaustive]
#[derive(Clone, Debug, Builder)]
#[builder(on(String, into))]
pub struct Config {
    pub(crate) credentials: Credentials,
    /// Sent as the `User-Agent` and as the first half of `x-amazon-user-agent`
    #[builder(default = DEFAULT_APPLICATION_NAME.to_owned())]
    pub(crate) application_name: String,
    #[builder(default = DEFAULT_APPLICATION_VERSION.to_owned())]
    pub(crate) application_version: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub(crate) timeout: Duration,
    /// Replaces the `https://{region host}` base resolved from the marketplace id, e.g. for a
    /// mock server
    pub(crate) base_url: Option<String>,
    /// Source of the `Timestamp` parameter; defaults to [`Utc::now`]
    pub(crate) timestamp_generator: Option<fn() -> DateTime<Utc>>,
    /// Source of feed `MessageID`s when the caller supplies none; defaults to a random `u32`
    pub(crate) message_id_generator: Option<fn() -> u32>,
}

impl Config {
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    #[must_use]
    pub fn application_version(&self) -> &str {
        &self.application_version
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `x-amazon-user-agent` header value.
    #[must_use]
    pub fn amazon_user_agent(&self) -> String {
        format!("{}/{}", self.application_name, self.application_version)
    }

    pub(crate) fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp_generator.unwrap_or(Utc::now)()
    }

    pub(crate) fn message_id(&self) -> u32 {
        self.message_id_generator.unwrap_or(random_message_id)()
    }
}

fn random_message_id() -> u32 {
    rand::rng().random_range(1..=u32::MAX)
}

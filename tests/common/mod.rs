#![allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    reason = "Do not need additional syntax for setting up tests, and https://github.com/rust-lang/rust-clippy/issues/13981"
)]
#![allow(
    unused,
    reason = "Deeply nested uses in sub-modules are falsely flagged as being unused"
)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use amazon_mws_client::auth::Credentials;
use amazon_mws_client::transport::{HttpRequest, HttpResponse, Transport};
use amazon_mws_client::types::{DateTime, Utc};
use amazon_mws_client::{Client, Config};
use async_trait::async_trait;
use chrono::TimeZone as _;
use httpmock::MockServer;
use reqwest::StatusCode;

pub const MARKETPLACE_ID: &str = "ATVPDKIKX0DER";
pub const SELLER_ID: &str = "A1SELLER0000";
pub const ACCESS_KEY_ID: &str = "AKIAEXAMPLE";
pub const SECRET: &str = "secret";
pub const AUTH_TOKEN: &str = "amzn.mws.token";

pub const TIMESTAMP: &str = "2024-01-02T03:04:05.000Z";
pub const MESSAGE_ID: u32 = 42;

pub const XML: &str = "text/xml";

#[must_use]
pub fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
}

#[must_use]
pub fn message_id() -> u32 {
    MESSAGE_ID
}

#[must_use]
pub fn credentials() -> Credentials {
    Credentials::builder()
        .marketplace_id(MARKETPLACE_ID)
        .seller_id(SELLER_ID)
        .access_key_id(ACCESS_KEY_ID)
        .secret_access_key(SECRET)
        .build()
}

/// Config pointing at `base_url` with a fixed clock and message id.
#[must_use]
pub fn config(base_url: &str) -> Config {
    Config::builder()
        .credentials(credentials())
        .base_url(base_url)
        .timestamp_generator(timestamp)
        .message_id_generator(message_id)
        .build()
}

pub fn client(server: &MockServer) -> anyhow::Result<Client> {
    Ok(Client::new(config(&server.base_url()))?)
}

/// Wraps `result` in the `{operation}Response` envelope MWS answers with.
#[must_use]
pub fn response(operation: &str, result: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<{operation}Response xmlns="https://mws.amazonservices.com/">
  <{operation}Result>{result}</{operation}Result>
  <ResponseMetadata><RequestId>88faca76-b600-46d2-b53c-0c8c4533e43a</RequestId></ResponseMetadata>
</{operation}Response>"#
    )
}

/// A transport that records requests and answers every one with `body` as XML.
pub struct Spy {
    requests: Mutex<Vec<HttpRequest>>,
    body: String,
}

impl Spy {
    #[must_use]
    pub fn new<S: Into<String>>(body: S) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for Spy {
    async fn send(&self, request: HttpRequest) -> amazon_mws_client::Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(HttpResponse::new(
            StatusCode::OK,
            Some(XML.to_owned()),
            self.body.clone(),
        ))
    }
}

/// Query pairs of a request URL.
#[must_use]
pub fn query(request: &HttpRequest) -> BTreeMap<String, String> {
    request.url.query_pairs().into_owned().collect()
}

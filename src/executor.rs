//! Builds, signs and sends one MWS call, then unwraps its response envelope.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use md5::{Digest as _, Md5};
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret as _;
use serde::de::DeserializeOwned;
use url::Url;

use crate::Result;
use crate::auth::{self, SIGNATURE_METHOD, SIGNATURE_VERSION};
use crate::codec::{self, Value};
use crate::config::Config;
use crate::endpoint::{self, EndpointDescriptor, Envelope};
use crate::error::Error;
use crate::serde_helpers;
use crate::transport::{HttpRequest, HttpResponse, Transport};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";

const CONTENT_MD5: HeaderName = HeaderName::from_static("content-md5");
const SUBMIT_FEED: &str = "SubmitFeed";

/// Caller query parameters.
///
/// A key mapped to `None` is omitted from the request even when the executor would otherwise
/// fill in a default for it. Empty values are dropped as well.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, Option<String>>);

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        self.0.insert(key.into(), Some(value.into()));
        self
    }

    /// Sets `key` only when `value` is present.
    pub fn maybe_set<K: Into<String>, V: Into<String>>(
        &mut self,
        key: K,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// Keeps `key` out of the request, defaults included.
    pub fn omit<K: Into<String>>(&mut self, key: K) -> &mut Self {
        self.0.insert(key.into(), None);
        self
    }

    /// `prefix.1`, `prefix.2`, ... for each of `values`, e.g. `ASINList.ASIN.1`.
    pub fn set_list<I, V>(&mut self, prefix: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        for (index, value) in values.into_iter().enumerate() {
            self.set(format!("{prefix}.{}", index + 1), value);
        }
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Option::as_deref)
    }

    #[must_use]
    pub fn is_omitted(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(None))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}

/// A request body and its declared content type.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Body {
    pub content: String,
    pub content_type: String,
}

impl Body {
    #[must_use]
    pub fn new<C: Into<String>, T: Into<String>>(content: C, content_type: T) -> Self {
        Self {
            content: content.into(),
            content_type: content_type.into(),
        }
    }
}

/// Decoded result of [`Executor::execute`].
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// An XML response, already unwrapped from its envelope
    Value(Value),
    /// Any non-XML response body, e.g. a tab-delimited report
    Text(String),
}

impl Payload {
    /// The decoded tree, with a text body becoming a string scalar.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Payload::Value(value) => value,
            Payload::Text(text) => Value::from(text),
        }
    }
}

/// Signs and sends calls for one configured seller account.
pub struct Executor {
    config: Config,
    transport: Arc<dyn Transport>,
    base_url: Url,
    signing_host: String,
    region_host: &'static str,
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("config", &self.config)
            .field("base_url", &self.base_url.as_str())
            .field("signing_host", &self.signing_host)
            .finish_non_exhaustive()
    }
}

impl Executor {
    /// Validates `config` and resolves the region URL from its marketplace id.
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Result<Self> {
        let region_host = config.credentials.validate()?;
        let base_url = match &config.base_url {
            Some(url) => Url::parse(url)?,
            None => Url::parse(&format!("https://{region_host}"))?,
        };
        let host = base_url
            .host_str()
            .ok_or_else(|| Error::configuration(format!("{base_url} has no host")))?;
        let signing_host = match base_url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        };

        Ok(Self {
            config,
            transport,
            base_url,
            signing_host,
            region_host,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Host the configured marketplace belongs to, e.g. `mws-eu.amazonservices.com`.
    #[must_use]
    pub fn region_host(&self) -> &'static str {
        self.region_host
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends `operation` and returns the response body untouched.
    pub async fn execute_raw(
        &self,
        operation: &str,
        params: Params,
        body: Option<Body>,
    ) -> Result<String> {
        let (_, response) = self.send(operation, params, body).await?;
        Ok(response.body)
    }

    /// Sends `operation` and unwraps the XML envelope named by its [`EndpointDescriptor`].
    ///
    /// A missing envelope key yields an empty map; a non-XML body comes back as
    /// [`Payload::Text`].
    pub async fn execute(
        &self,
        operation: &str,
        params: Params,
        body: Option<Body>,
    ) -> Result<Payload> {
        let (descriptor, response) = self.send(operation, params, body).await?;

        if !response.is_xml() {
            return Ok(Payload::Text(response.body));
        }

        let decoded = codec::from_xml(&response.body)?;
        let value = match (descriptor.envelope, decoded) {
            (Envelope::Root, decoded) => decoded,
            (Envelope::Key(key), Value::Map(mut map)) => map.remove(key).unwrap_or_default(),
            (Envelope::Key(_), _) => Value::default(),
        };

        Ok(Payload::Value(value))
    }

    /// [`Self::execute`] followed by deserialization of the unwrapped value into `T`.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        operation: &str,
        params: Params,
    ) -> Result<T> {
        let value = self.execute(operation, params, None).await?.into_value();
        serde_helpers::from_value(&value)
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "debug",
            skip(self, params, body),
            fields(method, path, status_code)
        )
    )]
    async fn send(
        &self,
        operation: &str,
        params: Params,
        body: Option<Body>,
    ) -> Result<(&'static EndpointDescriptor, HttpResponse)> {
        let descriptor = endpoint::lookup(operation)?;
        let method = Method::from(descriptor.method);
        let mut query = self.query(descriptor, params);
        let mut headers = HeaderMap::new();

        if let Some(body) = &body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_str(&body.content_type)?);
        }

        if descriptor.operation == SUBMIT_FEED {
            let content = body.as_ref().map_or("", |body| body.content.as_str());
            let digest = STANDARD.encode(Md5::digest(content.as_bytes()));
            headers.insert(CONTENT_MD5, HeaderValue::from_str(&digest)?);
            query.remove("MarketplaceId.Id.1");
            query.remove("SellerId");
        }

        let signature = auth::sign(
            &self.config.credentials.secret_access_key,
            &method,
            &self.signing_host,
            descriptor.path,
            &query,
        )?;

        let mut url = self.base_url.join(descriptor.path)?;
        url.set_query(Some(&format!(
            "{}&Signature={}",
            auth::canonical_query(&query),
            auth::encode_component(&signature)
        )));

        #[cfg(feature = "tracing")]
        {
            let span = tracing::Span::current();
            span.record("method", method.as_str());
            span.record("path", descriptor.path);
        }

        let request = HttpRequest {
            method: method.clone(),
            url,
            headers,
            body: body.map(|body| body.content),
        };
        let response = self.transport.send(request).await?;

        #[cfg(feature = "tracing")]
        tracing::Span::current().record("status_code", response.status.as_u16());

        if !response.status.is_success() {
            let (code, message) = error_message(&response.body);

            #[cfg(feature = "tracing")]
            tracing::warn!(
                status = %response.status,
                operation = %operation,
                code = ?code,
                message = %message,
                "MWS request failed"
            );

            return Err(Error::status(
                response.status,
                method,
                descriptor.path.to_owned(),
                code,
                message,
            ));
        }

        Ok((descriptor, response))
    }

    /// Caller parameters merged over the authentication defaults, sorted by key.
    fn query(&self, descriptor: &EndpointDescriptor, params: Params) -> BTreeMap<String, String> {
        let credentials = &self.config.credentials;
        let mut merged = params.0;

        let mut defaults = vec![
            (
                "Timestamp",
                self.config.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            ),
            ("AWSAccessKeyId", credentials.access_key_id.clone()),
            ("Action", descriptor.operation.to_owned()),
            ("SellerId", credentials.seller_id.clone()),
            ("SignatureMethod", SIGNATURE_METHOD.to_owned()),
            ("SignatureVersion", SIGNATURE_VERSION.to_owned()),
            ("Version", descriptor.version.to_owned()),
        ];
        if let Some(key) = descriptor.marketplace.key() {
            defaults.push((key, credentials.marketplace_id.clone()));
        }
        if let Some(token) = &credentials.auth_token {
            defaults.push(("MWSAuthToken", token.expose_secret().to_owned()));
        }

        for (key, value) in defaults {
            merged.entry(key.to_owned()).or_insert(Some(value));
        }

        merged
            .into_iter()
            .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
            .collect()
    }
}

/// `<Error><Code>` and `<Error><Message>` of an `ErrorResponse`, else the raw body as message.
fn error_message(body: &str) -> (Option<String>, String) {
    if !body.contains("<ErrorResponse") {
        return (None, body.to_owned());
    }

    match codec::from_xml(body) {
        Ok(decoded) => {
            let field = |name: &str| {
                decoded
                    .path(&["Error", name])
                    .and_then(Value::to_text)
            };
            let message = field("Message").unwrap_or_else(|| body.to_owned());
            (field("Code"), message)
        }
        Err(_) => (None, body.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_list_numbers_from_one() {
        let mut params = Params::new();
        params.set_list("ASINList.ASIN", ["B001", "B002"]);

        assert_eq!(params.get("ASINList.ASIN.1"), Some("B001"));
        assert_eq!(params.get("ASINList.ASIN.2"), Some("B002"));
        assert_eq!(params.get("ASINList.ASIN.3"), None);
    }

    #[test]
    fn omit_is_distinct_from_absent() {
        let mut params = Params::new();
        params.omit("MarketplaceId").maybe_set("NextToken", None::<String>);

        assert!(params.is_omitted("MarketplaceId"));
        assert!(!params.is_omitted("NextToken"));
        assert_eq!(params.get("MarketplaceId"), None);
    }

    #[test]
    fn error_message_from_envelope() {
        let body = r#"<?xml version="1.0"?>
<ErrorResponse xmlns="https://mws.amazonservices.com/Orders/2013-09-01">
  <Error>
    <Type>Sender</Type>
    <Code>InvalidParameterValue</Code>
    <Message>Invalid AmazonOrderId: validate</Message>
  </Error>
  <RequestId>abc</RequestId>
</ErrorResponse>"#;

        let (code, message) = error_message(body);

        assert_eq!(code.as_deref(), Some("InvalidParameterValue"));
        assert_eq!(message, "Invalid AmazonOrderId: validate");
    }

    #[test]
    fn error_message_falls_back_to_body() {
        assert_eq!(error_message("Service Unavailable"), (None, "Service Unavailable".to_owned()));
        assert_eq!(
            error_message("<ErrorResponse><Error>"),
            (None, "<ErrorResponse><Error>".to_owned())
        );
    }
}

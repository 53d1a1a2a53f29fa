//! The HTTP seam between the executor and the network.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use url::Url;

use crate::Result;
use crate::config::Config;

pub const AMAZON_USER_AGENT: HeaderName = HeaderName::from_static("x-amazon-user-agent");

/// A fully signed request: the query string, signature included, is already on `url`.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: StatusCode, content_type: Option<String>, body: String) -> Self {
        Self {
            status,
            content_type,
            body,
        }
    }

    /// Whether the response declares an XML content type.
    #[must_use]
    pub fn is_xml(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|content_type| content_type.to_ascii_lowercase().contains("xml"))
    }
}

/// Performs one HTTP round trip.
///
/// Implemented for [`reqwest::Client`]; tests and callers with special network needs (proxies,
/// custom TLS, recording spies) provide their own.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).send(request).await
    }
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;

        Ok(HttpResponse::new(status, content_type, body))
    }
}

/// The default transport: a [`reqwest::Client`] with the configured timeout and MWS headers.
pub(crate) fn default_transport(config: &Config) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();

    headers.insert(USER_AGENT, HeaderValue::from_str(config.application_name())?);
    headers.insert(ACCEPT, HeaderValue::from_static("application/xml"));
    headers.insert(
        AMAZON_USER_AGENT,
        HeaderValue::from_str(&config.amazon_user_agent())?,
    );

    Ok(reqwest::Client::builder()
        .default_headers(headers)
        .timeout(config.timeout())
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_content_types_are_detected() {
        let response = |content_type: Option<&str>| {
            HttpResponse::new(StatusCode::OK, content_type.map(str::to_owned), String::new())
        };

        assert!(response(Some("text/xml")).is_xml(), "text/xml");
        assert!(
            response(Some("Application/XML; charset=UTF-8")).is_xml(),
            "case insensitive"
        );
        assert!(!response(Some("text/plain")).is_xml(), "plain text");
        assert!(!response(None).is_xml(), "missing header");
    }
}

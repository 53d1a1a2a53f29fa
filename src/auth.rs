//! Credentials and MWS query-string request signing (signature version 2).

use std::collections::BTreeMap;
use std::env;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bon::Builder;
use hmac::{Hmac, Mac as _};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Method;
/// Secret string types that redact values in debug output for security.
pub use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::error::Error;
use crate::{
    ACCESS_KEY_ID_VAR, AUTH_TOKEN_VAR, MARKETPLACE_ID_VAR, Result, SECRET_ACCESS_KEY_VAR,
    SELLER_ID_VAR,
};

pub const SIGNATURE_METHOD: &str = "HmacSHA256";
pub const SIGNATURE_VERSION: &str = "2";

/// Everything outside `[A-Za-z0-9-_.~]` is percent-encoded, so a space becomes `%20`.
const RFC3986: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Seller credentials used to authenticate every call.
///
/// The secret key and the optional delegated `MWSAuthToken` are kept as [`SecretString`] and never
/// show up in `Debug` output.
#[non_exhaustive]
#[derive(Clone, Debug, Builder)]
#[builder(on(String, into))]
pub struct Credentials {
    pub(crate) marketplace_id: String,
    pub(crate) seller_id: String,
    pub(crate) access_key_id: String,
    #[builder(into)]
    pub(crate) secret_access_key: SecretString,
    #[builder(into)]
    pub(crate) auth_token: Option<SecretString>,
}

impl Credentials {
    /// Reads credentials from `MWS_MARKETPLACE_ID`, `MWS_SELLER_ID`, `MWS_ACCESS_KEY_ID`,
    /// `MWS_SECRET_ACCESS_KEY` and the optional `MWS_AUTH_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let required = |name: &str| {
            env::var(name).map_err(|e| Error::configuration(format!("{name}: {e}")))
        };

        Ok(Self {
            marketplace_id: required(MARKETPLACE_ID_VAR)?,
            seller_id: required(SELLER_ID_VAR)?,
            access_key_id: required(ACCESS_KEY_ID_VAR)?,
            secret_access_key: SecretString::from(required(SECRET_ACCESS_KEY_VAR)?),
            auth_token: env::var(AUTH_TOKEN_VAR)
                .ok()
                .filter(|token| !token.is_empty())
                .map(SecretString::from),
        })
    }

    #[must_use]
    pub fn marketplace_id(&self) -> &str {
        &self.marketplace_id
    }

    #[must_use]
    pub fn seller_id(&self) -> &str {
        &self.seller_id
    }

    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    #[must_use]
    pub fn secret_access_key(&self) -> &SecretString {
        &self.secret_access_key
    }

    #[must_use]
    pub fn auth_token(&self) -> Option<&SecretString> {
        self.auth_token.as_ref()
    }

    /// Every required field must be non-empty and the marketplace id must be a known one.
    pub(crate) fn validate(&self) -> Result<&'static str> {
        for (field, value) in [
            ("marketplace_id", self.marketplace_id.as_str()),
            ("seller_id", self.seller_id.as_str()),
            ("access_key_id", self.access_key_id.as_str()),
            ("secret_access_key", self.secret_access_key.expose_secret()),
        ] {
            if value.trim().is_empty() {
                return Err(Error::configuration(format!("{field} is required")));
            }
        }

        crate::marketplace_host(&self.marketplace_id).ok_or_else(|| {
            Error::configuration(format!("unknown marketplace id {}", self.marketplace_id))
        })
    }
}

/// Percent-encodes `input` with the RFC 3986 unreserved set.
#[must_use]
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, RFC3986).to_string()
}

/// `key=value` pairs joined by `&`, both sides RFC 3986 encoded, in byte-wise key order.
#[must_use]
pub fn canonical_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// The four newline-joined lines the signature is computed over.
#[must_use]
pub fn canonical_string(
    method: &Method,
    host: &str,
    path: &str,
    params: &BTreeMap<String, String>,
) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        method.as_str(),
        host,
        path,
        canonical_query(params)
    )
}

/// Base64 HMAC-SHA256 of the canonical string, keyed with the secret access key.
pub fn sign(
    secret: &SecretString,
    method: &Method,
    host: &str,
    path: &str,
    params: &BTreeMap<String, String>,
) -> Result<String> {
    hmac(secret, &canonical_string(method, host, path, params))
}

fn hmac(secret: &SecretString, message: &str) -> Result<String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.expose_secret().as_bytes())?;
    mac.update(message.as_bytes());

    let result = mac.finalize().into_bytes();
    Ok(STANDARD.encode(result))
}

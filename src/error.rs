use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

use hmac::digest::InvalidLength;
/// HTTP method type, re-exported for use with error inspection.
pub use reqwest::Method;
/// HTTP status code type, re-exported for use with error inspection.
pub use reqwest::StatusCode;
use reqwest::header;

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Missing credential field or unknown marketplace id, raised when building a client
    Configuration,
    /// Operation name absent from the endpoint catalog
    UnknownOperation,
    /// Caller input rejected before any request was sent, e.g. too many identifiers
    Validation,
    /// Error related to non-successful HTTP call
    Status,
    /// The HTTP transport itself failed (connection, DNS, TLS, timeout)
    Transport,
    /// Internal error from dependencies or an unexpected payload shape
    Internal,
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    backtrace: Backtrace,
}

impl Error {
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            backtrace: Backtrace::capture(),
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        let e = self.source.as_deref()?;
        e.downcast_ref::<E>()
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Validation {
            reason: message.into(),
        }
        .into()
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Configuration {
            reason: message.into(),
        }
        .into()
    }

    pub fn unknown_operation<S: Into<String>>(operation: S) -> Self {
        UnknownOperation {
            operation: operation.into(),
        }
        .into()
    }

    /// A successful response that lacks a field the call site cannot do without.
    pub fn unexpected_response<S: Into<String>>(message: S) -> Self {
        Error::with_source(
            Kind::Internal,
            UnexpectedResponse {
                reason: message.into(),
            },
        )
    }

    pub fn status<S: Into<String>>(
        status_code: StatusCode,
        method: Method,
        path: String,
        code: Option<String>,
        message: S,
    ) -> Self {
        Status {
            status_code,
            method,
            path,
            code,
            message: message.into(),
        }
        .into()
    }

    /// The remote [`Status`] carried by this error, if it is a [`Kind::Status`] error.
    #[must_use]
    pub fn as_status(&self) -> Option<&Status> {
        self.downcast_ref::<Status>()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{:?}: {}", self.kind, src),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// A non-2xx answer from MWS.
///
/// `message` is the `<Error><Message>` text of an `ErrorResponse` envelope when the body is one,
/// otherwise the raw body.
#[non_exhaustive]
#[derive(Debug)]
pub struct Status {
    pub status_code: StatusCode,
    pub method: Method,
    pub path: String,
    /// The `<Error><Code>` of the envelope, e.g. `InvalidParameterValue`
    pub code: Option<String>,
    pub message: String,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error({}) making {} call to {} with {}",
            self.status_code, self.method, self.path, self.message
        )
    }
}

impl StdError for Status {}

#[non_exhaustive]
#[derive(Debug)]
pub struct Validation {
    pub reason: String,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid: {}", self.reason)
    }
}

impl StdError for Validation {}

#[non_exhaustive]
#[derive(Debug)]
pub struct Configuration {
    pub reason: String,
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "configuration error: {}", self.reason)
    }
}

impl StdError for Configuration {}

#[non_exhaustive]
#[derive(Debug)]
pub struct UnknownOperation {
    pub operation: String,
}

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operation {}", self.operation)
    }
}

impl StdError for UnknownOperation {}

#[non_exhaustive]
#[derive(Debug)]
pub struct UnexpectedResponse {
    pub reason: String,
}

impl fmt::Display for UnexpectedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unexpected response: {}", self.reason)
    }
}

impl StdError for UnexpectedResponse {}

/// Failure while reading or writing XML.
#[non_exhaustive]
#[derive(Debug)]
pub struct Xml {
    pub reason: String,
}

impl fmt::Display for Xml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "xml: {}", self.reason)
    }
}

impl StdError for Xml {}

impl From<Xml> for Error {
    fn from(err: Xml) -> Self {
        Error::with_source(Kind::Internal, err)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::with_source(Kind::Transport, e)
    }
}

impl From<header::InvalidHeaderValue> for Error {
    fn from(e: header::InvalidHeaderValue) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<InvalidLength> for Error {
    fn from(e: InvalidLength) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::with_source(Kind::Configuration, e)
    }
}

impl From<Validation> for Error {
    fn from(err: Validation) -> Self {
        Error::with_source(Kind::Validation, err)
    }
}

impl From<Configuration> for Error {
    fn from(err: Configuration) -> Self {
        Error::with_source(Kind::Configuration, err)
    }
}

impl From<UnknownOperation> for Error {
    fn from(err: UnknownOperation) -> Self {
        Error::with_source(Kind::UnknownOperation, err)
    }
}

impl From<Status> for Error {
    fn from(err: Status) -> Self {
        Error::with_source(Kind::Status, err)
    }
}

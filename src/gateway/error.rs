//! Gateway errors and failure classification.

use std::error::Error as StdError;
use std::fmt;

use super::endpoint::Endpoint;
use crate::error::ErrorCode;

/// Boxed underlying cause of a failed request.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Upper bound on the response body kept for non-2xx diagnostics.
const MAX_BODY_DETAIL: usize = 2048;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by gateway construction and gateway queries.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The gateway could not be configured. Fatal at startup.
    #[error("invalid gateway configuration `{address}`: {reason}")]
    Configuration { address: String, reason: String },

    /// A caller-supplied argument was rejected before any request was sent.
    #[error("invalid argument `{name}` = {value}: {reason}")]
    InvalidArgument { name: &'static str, value: String, reason: &'static str },

    /// A request was sent (or attempted) and did not produce a usable result.
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl GatewayError {
    /// Failure classification for request errors, `None` for errors raised before I/O.
    #[must_use]
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Request(err) => Some(err.kind),
            Self::Configuration { .. } | Self::InvalidArgument { .. } => None,
        }
    }
}

impl ErrorCode for GatewayError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "E_CONFIGURATION",
            Self::InvalidArgument { .. } => "E_INVALID_ARGUMENT",
            Self::Request(err) => err.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(err) if err.retryable())
    }
}

// =============================================================================
// REQUEST FAILURES
// =============================================================================

/// How a request to the backend failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No complete response within the configured per-call timeout.
    Timeout,
    /// The backend could not be reached.
    ConnectionRefused,
    /// The backend answered with a non-2xx status.
    HttpStatus(u16),
    /// The response body could not be read or parsed into the expected shape.
    MalformedResponse,
    /// The caller's cancellation token fired before the call completed.
    Cancelled,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("timed out"),
            Self::ConnectionRefused => f.write_str("connection refused"),
            Self::HttpStatus(code) => write!(f, "HTTP status {code}"),
            Self::MalformedResponse => f.write_str("malformed response"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// A failed round trip: the endpoint attempted, its classification, and the cause.
#[derive(Debug)]
pub struct RequestError {
    /// Endpoint the request was issued against.
    pub endpoint: Endpoint,
    /// Classification of the failure.
    pub kind: FailureKind,
    detail: Option<String>,
    source: Option<BoxError>,
}

impl RequestError {
    pub(crate) fn new(endpoint: Endpoint, kind: FailureKind) -> Self {
        Self { endpoint, kind, detail: None, source: None }
    }

    pub(crate) fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the (truncated) response body of a non-2xx answer.
    pub(crate) fn with_detail(mut self, body: &str) -> Self {
        let mut end = body.len().min(MAX_BODY_DETAIL);
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        self.detail = Some(body[..end].to_owned());
        self
    }

    /// Classify a transport-level `reqwest` failure.
    pub(crate) fn from_reqwest(endpoint: Endpoint, err: reqwest::Error) -> Self {
        Self::new(endpoint, classify(&err)).with_source(err)
    }

    /// Response body captured for non-2xx answers, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    fn error_code(&self) -> &'static str {
        match self.kind {
            FailureKind::Timeout => "E_TIMEOUT",
            FailureKind::ConnectionRefused => "E_CONNECTION_REFUSED",
            FailureKind::HttpStatus(_) => "E_HTTP_STATUS",
            FailureKind::MalformedResponse => "E_MALFORMED_RESPONSE",
            FailureKind::Cancelled => "E_CANCELLED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(
            self.kind,
            FailureKind::Timeout | FailureKind::ConnectionRefused | FailureKind::HttpStatus(429 | 500..=599)
        )
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.endpoint, self.kind)?;
        if let Some(source) = &self.source {
            write!(f, " ({source})")?;
        }
        Ok(())
    }
}

impl StdError for RequestError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_deref().map(|err| err as &(dyn StdError + 'static))
    }
}

/// Timeouts are checked first: `reqwest` reports a connect timeout as both.
fn classify(err: &reqwest::Error) -> FailureKind {
    if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_connect() {
        FailureKind::ConnectionRefused
    } else if err.is_decode() || err.is_body() {
        FailureKind::MalformedResponse
    } else if let Some(status) = err.status() {
        FailureKind::HttpStatus(status.as_u16())
    } else {
        FailureKind::ConnectionRefused
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

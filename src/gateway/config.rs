//! Gateway configuration: backend base address and per-call timeout.

use std::time::Duration;

use reqwest::Url;

use super::error::GatewayError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Immutable connection settings shared by every gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    base_url: Url,
    timeout: Duration,
}

impl GatewayConfig {
    /// Validate a base address and timeout.
    ///
    /// The base must be an absolute `http` or `https` URL without query or
    /// fragment. Trailing slashes are ignored when endpoint paths are joined.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if the address is not a usable
    /// absolute URL or the timeout is zero.
    pub fn new(base: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let invalid = |reason: String| GatewayError::Configuration { address: base.to_owned(), reason };

        let base_url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme `{}`", base_url.scheme())));
        }
        if base_url.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host".to_owned()));
        }
        if base_url.query().is_some() || base_url.fragment().is_some() {
            return Err(invalid("base address must not carry a query or fragment".to_owned()));
        }
        if timeout.is_zero() {
            return Err(invalid("timeout must be greater than zero".to_owned()));
        }

        Ok(Self { base_url, timeout })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for a path such as `/alerts?limit=10`.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).unwrap_or_else(|_| unreachable!("default base URL is valid")),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

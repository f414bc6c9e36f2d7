//! Gateway: the only component that talks to the monitoring backend.
//!
//! DESIGN
//! ======
//! A `Gateway` owns one configured `reqwest::Client` (base address plus a
//! per-request timeout) and exposes one typed async function per backend
//! resource. It is built once at startup and handed to view collaborators by
//! reference or clone; there is no process-wide singleton.
//!
//! - Every call is a fresh round trip. Nothing is cached and nothing is
//!   retried here; callers decide using `ErrorCode::retryable`.
//! - Arguments are validated before any I/O.
//! - Calls share no mutable state, so any number may be in flight at once.
//!   The timeout applies to each call separately.
//! - Each call takes a `CancellationToken`. Cancelling drops the in-flight
//!   request and rejects with `FailureKind::Cancelled`.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod types;

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

pub use config::GatewayConfig;
pub use endpoint::Endpoint;
pub use error::{FailureKind, GatewayError, RequestError};
pub use types::{Alert, AlertLimit, EngineStatus, StatsPoint, StatsRange, Status, ThresholdUpdate};

/// Handle to the monitoring backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Gateway {
    config: Arc<GatewayConfig>,
    http: reqwest::Client,
}

impl Gateway {
    /// Validate `base` and build the shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if `base` is not an absolute
    /// http(s) URL, the timeout is zero, or the HTTP client cannot be built.
    pub fn configure(base: &str, timeout: Duration) -> Result<Self, GatewayError> {
        Self::from_config(GatewayConfig::new(base, timeout)?)
    }

    /// Build a gateway from an already validated config.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if the HTTP client cannot be built.
    pub fn from_config(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::Configuration {
                address: config.base_url().to_string(),
                reason: format!("HTTP client build failed: {e}"),
            })?;
        tracing::debug!(base_url = %config.base_url(), timeout = ?config.timeout(), "gateway configured");
        Ok(Self { config: Arc::new(config), http })
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Fetch the most recent `limit` alerts via `GET /alerts?limit={limit}`.
    ///
    /// The backend's ordering is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidArgument`] without sending anything if
    /// `limit` is not positive, otherwise [`GatewayError::Request`] on failure.
    pub async fn fetch_alert_history(&self, limit: i64, cancel: &CancellationToken) -> Result<Vec<Alert>, GatewayError> {
        let limit = AlertLimit::new(limit)?;
        self.send_json(Endpoint::Alerts { limit }, None, cancel).await
    }

    /// [`Self::fetch_alert_history`] with the default limit of 50.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Request`] on failure.
    pub async fn fetch_recent_alerts(&self, cancel: &CancellationToken) -> Result<Vec<Alert>, GatewayError> {
        self.send_json(Endpoint::Alerts { limit: AlertLimit::DEFAULT }, None, cancel).await
    }

    /// Fetch the current engine/system status via `GET /status`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Request`] on failure.
    pub async fn fetch_status(&self, cancel: &CancellationToken) -> Result<Status, GatewayError> {
        self.send_json(Endpoint::Status, None, cancel).await
    }

    /// Fetch threat counts bucketed over `range` via `GET /stats/threats`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Request`] on failure.
    pub async fn fetch_threat_stats(
        &self,
        range: StatsRange,
        cancel: &CancellationToken,
    ) -> Result<Vec<StatsPoint>, GatewayError> {
        self.send_json(Endpoint::ThreatStats { range }, None, cancel).await
    }

    /// Fetch detection engine settings via `GET /engine/status`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Request`] on failure.
    pub async fn fetch_engine_status(&self, cancel: &CancellationToken) -> Result<EngineStatus, GatewayError> {
        self.send_json(Endpoint::EngineStatus, None, cancel).await
    }

    /// Change the detection threshold via `POST /engine/config`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidArgument`] without sending anything
    /// unless `threshold` is in `(0, 1]`, otherwise [`GatewayError::Request`]
    /// on failure.
    pub async fn update_engine_threshold(
        &self,
        threshold: f64,
        cancel: &CancellationToken,
    ) -> Result<ThresholdUpdate, GatewayError> {
        let threshold = types::validate_threshold(threshold)?;
        let body = serde_json::json!({ "threshold": threshold });
        self.send_json(Endpoint::EngineConfig, Some(body), cancel).await
    }

    // =========================================================================
    // TRANSPORT
    // =========================================================================

    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: Option<Value>,
        cancel: &CancellationToken,
    ) -> Result<T, GatewayError> {
        let started = Instant::now();
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(RequestError::new(endpoint, FailureKind::Cancelled)),
            result = self.round_trip(endpoint, body) => result,
        };

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match &result {
            Ok(_) => tracing::debug!(%endpoint, elapsed_ms, "gateway request completed"),
            Err(err) => tracing::warn!(%endpoint, elapsed_ms, kind = %err.kind, "gateway request failed"),
        }
        result.map_err(GatewayError::from)
    }

    async fn round_trip<T: DeserializeOwned>(&self, endpoint: Endpoint, body: Option<Value>) -> Result<T, RequestError> {
        let url = self.config.url_for(&endpoint.path());
        let mut request = self.http.request(endpoint.method(), url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RequestError::from_reqwest(endpoint, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RequestError::from_reqwest(endpoint, e))?;

        if !status.is_success() {
            return Err(RequestError::new(endpoint, FailureKind::HttpStatus(status.as_u16())).with_detail(&text));
        }

        serde_json::from_str(&text).map_err(|e| RequestError::new(endpoint, FailureKind::MalformedResponse).with_source(e))
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

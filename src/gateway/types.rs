//! Telemetry records and validated query parameters.
//!
//! `Alert` and `Status` are opaque: the backend owns their shape and this
//! layer transports them unmodified. The accessors are read-only lookups
//! into the underlying JSON and return `None` when a field is absent or has
//! an unexpected type.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::GatewayError;

/// Number of alerts requested when the caller does not choose.
pub const DEFAULT_ALERT_LIMIT: u32 = 50;

// =============================================================================
// OPAQUE RECORDS
// =============================================================================

/// A security alert exactly as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alert(Value);

impl Alert {
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    #[must_use]
    pub fn id(&self) -> Option<u64> {
        self.0.get("id").and_then(Value::as_u64)
    }

    /// Attack classification, e.g. `"PortScan"` or `"DDoS"`.
    #[must_use]
    pub fn alert_type(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    #[must_use]
    pub fn source_ip(&self) -> Option<&str> {
        self.0.get("source_ip").and_then(Value::as_str)
    }

    #[must_use]
    pub fn confidence(&self) -> Option<f64> {
        self.0.get("confidence").and_then(Value::as_f64)
    }

    #[must_use]
    pub fn timestamp(&self) -> Option<&str> {
        self.0.get("timestamp").and_then(Value::as_str)
    }
}

impl From<Value> for Alert {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Current engine/system health, most recent snapshot only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(Value);

impl Status {
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Engine state label, e.g. `"running"`.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    #[must_use]
    pub fn uptime_secs(&self) -> Option<f64> {
        self.0.get("uptime_sec").and_then(Value::as_f64)
    }

    #[must_use]
    pub fn active_flows(&self) -> Option<u64> {
        self.0.get("active_flows").and_then(Value::as_u64)
    }

    /// Inbound and outbound traffic rates in Mbps.
    #[must_use]
    pub fn traffic_mbps(&self) -> Option<(f64, f64)> {
        let rx = self.0.get("traffic_in").and_then(Value::as_f64)?;
        let tx = self.0.get("traffic_out").and_then(Value::as_f64)?;
        Some((rx, tx))
    }
}

impl From<Value> for Status {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

// =============================================================================
// TYPED RECORDS
// =============================================================================

/// One bucket of the threat chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsPoint {
    pub label: String,
    pub count: u64,
}

/// Detection engine settings as reported by `/engine/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_path: String,
    pub scaler_path: String,
    pub current_threshold: f64,
    pub suspicious_threshold: f64,
}

/// Acknowledgement returned after a threshold update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdUpdate {
    pub message: String,
    pub threshold: f64,
}

// =============================================================================
// PARAMETERS
// =============================================================================

/// A positive alert count accepted by `/alerts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlertLimit(NonZeroU32);

impl AlertLimit {
    pub const DEFAULT: Self = match NonZeroU32::new(DEFAULT_ALERT_LIMIT) {
        Some(n) => Self(n),
        None => panic!("default alert limit must be positive"),
    };

    /// Validate a caller-supplied limit.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidArgument`] if `limit` is zero, negative,
    /// or does not fit in a `u32`.
    pub fn new(limit: i64) -> Result<Self, GatewayError> {
        u32::try_from(limit)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or_else(|| GatewayError::InvalidArgument {
                name: "limit",
                value: limit.to_string(),
                reason: "must be a positive integer no greater than 4294967295",
            })
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for AlertLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for AlertLimit {
    type Error = GatewayError;

    fn try_from(limit: i64) -> Result<Self, Self::Error> {
        Self::new(limit)
    }
}

impl fmt::Display for AlertLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregation window for `/stats/threats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatsRange {
    /// Past 24 hours, hourly buckets.
    #[default]
    Day,
    /// Past 7 days, daily buckets.
    Week,
    /// Past 30 days, daily buckets.
    Month,
}

impl StatsRange {
    /// Label the backend expects in the `range` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
        }
    }
}

impl FromStr for StatsRange {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(GatewayError::InvalidArgument {
                name: "range",
                value: s.to_owned(),
                reason: "expected one of day, week, month",
            }),
        }
    }
}

/// Check a detection threshold before it is sent to `/engine/config`.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidArgument`] unless `threshold` is finite and
/// in `(0, 1]`.
pub fn validate_threshold(threshold: f64) -> Result<f64, GatewayError> {
    if threshold.is_finite() && threshold > 0.0 && threshold <= 1.0 {
        Ok(threshold)
    } else {
        Err(GatewayError::InvalidArgument {
            name: "threshold",
            value: threshold.to_string(),
            reason: "must be greater than 0 and at most 1",
        })
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

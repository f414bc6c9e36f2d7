//! Endpoint descriptors for the monitoring backend.

use std::fmt;

use reqwest::Method;

use super::types::{AlertLimit, StatsRange};

/// One backend resource the gateway knows how to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /alerts?limit={limit}` returning a JSON array of alerts.
    Alerts { limit: AlertLimit },
    /// `GET /status` returning the engine/system status object.
    Status,
    /// `GET /stats/threats?range={range}` returning chart points.
    ThreatStats { range: StatsRange },
    /// `GET /engine/status` returning detection engine settings.
    EngineStatus,
    /// `POST /engine/config` updating the detection threshold.
    EngineConfig,
}

impl Endpoint {
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::Alerts { .. } | Self::Status | Self::ThreatStats { .. } | Self::EngineStatus => Method::GET,
            Self::EngineConfig => Method::POST,
        }
    }

    /// Path relative to the configured base address, including any query string.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Alerts { limit } => format!("/alerts?limit={limit}"),
            Self::Status => "/status".to_owned(),
            Self::ThreatStats { range } => format!("/stats/threats?range={}", range.as_str()),
            Self::EngineStatus => "/engine/status".to_owned(),
            Self::EngineConfig => "/engine/config".to_owned(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

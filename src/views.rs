//! Per-view data loading.
//!
//! Once a view collaborator has resolved its route, it asks for the data that
//! view renders. Views needing several resources issue their gateway calls
//! concurrently; the first failure fails the whole load and the remaining
//! calls are dropped.

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::gateway::{Alert, EngineStatus, Gateway, GatewayError, StatsPoint, StatsRange, Status};
use crate::router::View;

/// Everything one dashboard view needs to render.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewData {
    Dashboard { status: Status, alerts: Vec<Alert>, threats: Vec<StatsPoint> },
    Threats { alerts: Vec<Alert>, threats: Vec<StatsPoint> },
    Asset { status: Status },
    Engine { engine: EngineStatus },
    Settings { engine: EngineStatus },
}

impl ViewData {
    #[must_use]
    pub fn view(&self) -> View {
        match self {
            Self::Dashboard { .. } => View::Dashboard,
            Self::Threats { .. } => View::Threats,
            Self::Asset { .. } => View::Asset,
            Self::Engine { .. } => View::Engine,
            Self::Settings { .. } => View::Settings,
        }
    }
}

/// Fetch the data `view` renders.
///
/// # Errors
///
/// Returns the [`GatewayError`] of the first call that fails.
pub async fn load_view(gateway: &Gateway, view: View, cancel: &CancellationToken) -> Result<ViewData, GatewayError> {
    let data = match view {
        View::Dashboard => {
            let (status, alerts, threats) = tokio::try_join!(
                gateway.fetch_status(cancel),
                gateway.fetch_recent_alerts(cancel),
                gateway.fetch_threat_stats(StatsRange::Day, cancel),
            )?;
            ViewData::Dashboard { status, alerts, threats }
        }
        View::Threats => {
            let (alerts, threats) = tokio::try_join!(
                gateway.fetch_recent_alerts(cancel),
                gateway.fetch_threat_stats(StatsRange::Week, cancel),
            )?;
            ViewData::Threats { alerts, threats }
        }
        View::Asset => ViewData::Asset { status: gateway.fetch_status(cancel).await? },
        View::Engine => ViewData::Engine { engine: gateway.fetch_engine_status(cancel).await? },
        View::Settings => ViewData::Settings { engine: gateway.fetch_engine_status(cancel).await? },
    };
    tracing::debug!(%view, "view data loaded");
    Ok(data)
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;

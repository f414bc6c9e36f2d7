//! # ids-console
//!
//! Client-side access layer for the intrusion-detection dashboard.
//!
//! - [`gateway`] mediates every HTTP call to the monitoring backend
//!   (alerts, status, threat statistics, engine settings).
//! - [`router`] maps dashboard paths to views and records navigation history.
//! - [`views`] loads the data each view renders through the gateway.

pub mod error;
pub mod gateway;
pub mod router;
pub mod views;

#[cfg(test)]
mod test_support;

pub use error::ErrorCode;
pub use gateway::{Gateway, GatewayConfig, GatewayError};
pub use router::{NavigationState, RouteEntry, RouteError, RouteTable, Router, View};
pub use views::{ViewData, load_view};

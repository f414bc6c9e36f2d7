//! Router: maps URL paths to dashboard views and tracks navigation history.
//!
//! DESIGN
//! ======
//! The route table is fixed when the `Router` is built and never changes.
//! History only grows: each successful `navigate` appends one entry and the
//! last entry is the current route. A failed navigation leaves history
//! untouched. Appends go through a single `RwLock` writer so interleaved
//! navigations cannot corrupt the sequence; the last to take the lock wins.

pub mod table;

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use crate::error::ErrorCode;
pub use table::{RouteEntry, RouteTable, View};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by route table construction and navigation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("duplicate route path: {0}")]
    DuplicatePath(String),

    #[error("duplicate route name: {0}")]
    DuplicateName(String),

    #[error("invalid route `{path}`: {reason}")]
    InvalidEntry { path: String, reason: &'static str },

    #[error("no route matches `{0}`")]
    RouteNotFound(String),

    #[error("no route is active yet")]
    NoActiveRoute,
}

impl ErrorCode for RouteError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicatePath(_) => "E_DUPLICATE_PATH",
            Self::DuplicateName(_) => "E_DUPLICATE_NAME",
            Self::InvalidEntry { .. } => "E_INVALID_ROUTE",
            Self::RouteNotFound(_) => "E_ROUTE_NOT_FOUND",
            Self::NoActiveRoute => "E_NO_ACTIVE_ROUTE",
        }
    }
}

// =============================================================================
// NAVIGATION STATE
// =============================================================================

/// Snapshot of the active route and every resolution that led to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    /// The most recently navigated entry.
    pub current: RouteEntry,
    /// All resolutions in navigation order, `current` last.
    pub history: Vec<RouteEntry>,
}

impl NavigationState {
    /// The entry navigated to before `current`, if any.
    #[must_use]
    pub fn previous(&self) -> Option<&RouteEntry> {
        self.history.len().checked_sub(2).map(|idx| &self.history[idx])
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Route table plus the navigation history driven by it.
#[derive(Debug)]
pub struct Router {
    table: Arc<RouteTable>,
    history: RwLock<Vec<RouteEntry>>,
}

impl Router {
    #[must_use]
    pub fn new(table: RouteTable) -> Self {
        Self { table: Arc::new(table), history: RwLock::new(Vec::new()) }
    }

    /// Router over [`RouteTable::dashboard`].
    #[must_use]
    pub fn dashboard() -> Self {
        Self::new(RouteTable::dashboard())
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Exact-match path resolution without touching history.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::RouteNotFound`] if no entry has this path.
    pub fn resolve(&self, path: &str) -> Result<&RouteEntry, RouteError> {
        self.table.resolve(path)
    }

    /// Resolve `path_or_name` and append it to history.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::RouteNotFound`] if neither a path nor a name
    /// matches; history is unchanged in that case.
    pub fn navigate(&self, path_or_name: &str) -> Result<NavigationState, RouteError> {
        let entry = self.table.lookup(path_or_name)?.clone();

        let mut history = self.history.write().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(path = %entry.path, name = %entry.name, depth = history.len() + 1, "navigate");
        history.push(entry.clone());

        Ok(NavigationState { current: entry, history: history.clone() })
    }

    /// The most recently navigated entry.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NoActiveRoute`] before the first navigation.
    pub fn current_route(&self) -> Result<RouteEntry, RouteError> {
        let history = self.history.read().unwrap_or_else(PoisonError::into_inner);
        history.last().cloned().ok_or(RouteError::NoActiveRoute)
    }

    /// Current navigation snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NoActiveRoute`] before the first navigation.
    pub fn state(&self) -> Result<NavigationState, RouteError> {
        let history = self.history.read().unwrap_or_else(PoisonError::into_inner);
        let current = history.last().cloned().ok_or(RouteError::NoActiveRoute)?;
        Ok(NavigationState { current, history: history.clone() })
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

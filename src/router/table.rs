//! Static route table: path → view, validated once at construction.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::RouteError;

/// Dashboard sections a route can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    Dashboard,
    Threats,
    Asset,
    Engine,
    Settings,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Dashboard => "Dashboard",
            Self::Threats => "Threats",
            Self::Asset => "Asset",
            Self::Engine => "Engine",
            Self::Settings => "Settings",
        };
        f.write_str(label)
    }
}

/// One row of the navigation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub path: String,
    pub name: String,
    pub view: View,
}

impl RouteEntry {
    #[must_use]
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: View) -> Self {
        Self { path: path.into(), name: name.into(), view }
    }
}

/// Immutable lookup structure over a closed set of routes.
///
/// Paths and names are each unique. Resolution is a single hash lookup;
/// `entries` keeps declaration order for listing.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    by_path: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    /// Validate and index `entries`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::DuplicatePath`] or [`RouteError::DuplicateName`]
    /// on the first repeated key, and [`RouteError::InvalidEntry`] for an
    /// empty name or a path that does not start with `/`.
    pub fn build(entries: impl IntoIterator<Item = RouteEntry>) -> Result<Self, RouteError> {
        let entries: Vec<RouteEntry> = entries.into_iter().collect();
        let mut by_path = HashMap::with_capacity(entries.len());
        let mut by_name = HashMap::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            if !entry.path.starts_with('/') {
                return Err(RouteError::InvalidEntry { path: entry.path.clone(), reason: "path must start with `/`" });
            }
            if entry.name.is_empty() {
                return Err(RouteError::InvalidEntry { path: entry.path.clone(), reason: "name must not be empty" });
            }
            if by_path.insert(entry.path.clone(), idx).is_some() {
                return Err(RouteError::DuplicatePath(entry.path.clone()));
            }
            if by_name.insert(entry.name.clone(), idx).is_some() {
                return Err(RouteError::DuplicateName(entry.name.clone()));
            }
        }

        Ok(Self { entries, by_path, by_name })
    }

    /// The monitoring dashboard's navigation surface.
    #[must_use]
    pub fn dashboard() -> Self {
        let entries = [
            RouteEntry::new("/", "Dashboard", View::Dashboard),
            RouteEntry::new("/threats", "Threats", View::Threats),
            RouteEntry::new("/asset", "Asset", View::Asset),
            RouteEntry::new("/engine", "Engine", View::Engine),
            RouteEntry::new("/settings", "Settings", View::Settings),
        ];
        Self::build(entries).unwrap_or_else(|e| unreachable!("dashboard route table is valid: {e}"))
    }

    /// Exact-match lookup by path.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::RouteNotFound`] if no entry has this path.
    pub fn resolve(&self, path: &str) -> Result<&RouteEntry, RouteError> {
        self.by_path
            .get(path)
            .map(|&idx| &self.entries[idx])
            .ok_or_else(|| RouteError::RouteNotFound(path.to_owned()))
    }

    /// Lookup by symbolic name.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::RouteNotFound`] if no entry has this name.
    pub fn by_name(&self, name: &str) -> Result<&RouteEntry, RouteError> {
        self.by_name
            .get(name)
            .map(|&idx| &self.entries[idx])
            .ok_or_else(|| RouteError::RouteNotFound(name.to_owned()))
    }

    /// Path registered under a symbolic name, for building links.
    #[must_use]
    pub fn path_for(&self, name: &str) -> Option<&str> {
        self.by_name(name).ok().map(|entry| entry.path.as_str())
    }

    /// Path match first, then symbolic name.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::RouteNotFound`] if neither matches.
    pub fn lookup(&self, path_or_name: &str) -> Result<&RouteEntry, RouteError> {
        self.resolve(path_or_name).or_else(|_| self.by_name(path_or_name))
    }

    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;

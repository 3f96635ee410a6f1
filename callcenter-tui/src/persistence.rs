//! Persistence for lightweight UI state.
//!
//! Only the last active route is stored. Agents and call records are always
//! fetched fresh.

use crate::nav::Route;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Route path such as `/history`; resolved on load so stale values fall back.
    pub last_route: String,
}

impl PersistedState {
    pub fn new(route: Route) -> Self {
        Self {
            last_route: route.path().to_string(),
        }
    }

    pub fn route(&self) -> Option<Route> {
        Route::resolve(&self.last_route)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub fn load(path: &Path) -> Result<Option<PersistedState>, PersistenceError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    let state = serde_json::from_str::<PersistedState>(&contents)?;
    Ok(Some(state))
}

pub fn save(path: &Path, state: &PersistedState) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(state)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Pick the initial route: command line first, then the stored route, then `/`.
pub fn initial_route(requested: Option<&str>, stored: Option<&PersistedState>) -> Route {
    requested
        .and_then(Route::resolve)
        .or_else(|| stored.and_then(PersistedState::route))
        .unwrap_or_default()
}

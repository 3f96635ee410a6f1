//! Route table and navigation helpers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    #[default]
    Agents,
    Call,
    History,
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Route::Agents => "Agents",
            Route::Call => "Make Call",
            Route::History => "Call History",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Agents => "/agents",
            Route::Call => "/call",
            Route::History => "/history",
        }
    }

    /// Resolve a path to a route. The root path redirects to the agents view.
    pub fn resolve(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        if trimmed.is_empty() || trimmed == "/" {
            return Some(Route::Agents);
        }
        let normalized = trimmed.trim_end_matches('/');
        Self::all().iter().copied().find(|route| route.path() == normalized)
    }

    pub fn all() -> &'static [Route] {
        &[Route::Agents, Route::Call, Route::History]
    }

    pub fn index(&self) -> usize {
        Self::all()
            .iter()
            .position(|r| r == self)
            .unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Route> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> Route {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> Route {
        let idx = self.index();
        let all = Self::all();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}

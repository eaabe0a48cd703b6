//! Outcome of the most recent user fetch.

use serde::Serialize;

use crate::user::User;

/// Tagged state published by the refresh controller.
///
/// Exactly one variant is active at a time, so presentation never sees
/// a half-loaded list next to an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum FetchResult {
    /// A fetch is in flight (also the state before the first fetch).
    #[default]
    Loading,
    /// Users in upstream response order. May be empty.
    Success(Vec<User>),
    /// Human-readable failure description.
    Error(String),
}

impl FetchResult {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Loaded users, if the last fetch succeeded.
    pub fn users(&self) -> Option<&[User]> {
        match self {
            Self::Success(users) => Some(users),
            _ => None,
        }
    }

    /// Failure message, if the last fetch failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

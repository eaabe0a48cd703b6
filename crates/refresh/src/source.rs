//! Where the controller gets its users from.
//!
//! [`UserSource`] is the seam between the refresh loop and the network;
//! production wires in [`RandomUserApi`], tests wire in stubs.

use async_trait::async_trait;
use userfeed_core::user::User;
use userfeed_randomuser::api::{RandomUserApi, RandomUserApiError};

/// A fetch failure as seen by the controller.
///
/// Carries only the description: every upstream error is flattened to a
/// message at this boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<RandomUserApiError> for FetchError {
    fn from(err: RandomUserApiError) -> Self {
        Self::new(err.to_string())
    }
}

/// Asynchronous provider of user batches.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Fetch up to `count` users.
    async fn fetch_users(&self, count: u32) -> Result<Vec<User>, FetchError>;
}

#[async_trait]
impl UserSource for RandomUserApi {
    async fn fetch_users(&self, count: u32) -> Result<Vec<User>, FetchError> {
        Ok(self.fetch_random_users(count).await?)
    }
}

//! Events emitted by the refresh controller.
//!
//! The `watch` channels only expose the latest value; these events record
//! every individual publication, in order.

use serde::Serialize;

/// What caused a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchTrigger {
    /// The refresh loop, either at start-up or when a countdown ran out.
    Scheduled,
    /// An explicit [`fetch_now`](crate::controller::RefreshController::fetch_now).
    Manual,
}

/// A single state publication by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RefreshEvent {
    /// `result` was set to `Loading`.
    FetchStarted { trigger: FetchTrigger },

    /// `result` was set to `Success`.
    FetchSucceeded {
        trigger: FetchTrigger,
        /// Number of users received.
        count: usize,
    },

    /// `result` was set to `Error`.
    FetchFailed {
        trigger: FetchTrigger,
        /// Message published in the result.
        message: String,
    },

    /// `seconds_until_refresh` was set.
    Countdown { seconds: u32 },
}

//! Shared domain types for the userfeed workspace.
//!
//! Holds the user payload model returned by the random-user API and the
//! tagged [`FetchResult`](fetch_result::FetchResult) that the refresh
//! controller publishes to presentation.

pub mod defaults;
pub mod fetch_result;
pub mod user;

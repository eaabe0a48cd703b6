//! Auto-refresh controller for the random-user feed.
//!
//! [`RefreshController`](controller::RefreshController) owns the feed
//! state, runs the fetch/countdown loop on a Tokio task, and exposes the
//! state as independent `watch` channels plus a broadcast event stream.

pub mod config;
pub mod controller;
pub mod events;
pub mod source;

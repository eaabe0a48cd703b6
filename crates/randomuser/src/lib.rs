//! HTTP client for the random-user API.
//!
//! Wraps `GET /api/?results=N` using [`reqwest`] and maps every failure
//! into [`RandomUserApiError`](api::RandomUserApiError).

pub mod api;

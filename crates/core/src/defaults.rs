//! Fixed configuration of the random-user feed.

/// Public random-user API host.
pub const DEFAULT_BASE_URL: &str = "https://randomuser.me";

/// Path of the user listing endpoint, relative to the base URL.
pub const USERS_PATH: &str = "/api/";

/// Query parameter carrying the requested number of users.
pub const RESULTS_QUERY_PARAM: &str = "results";

/// Users requested per fetch.
pub const DEFAULT_USER_COUNT: u32 = 5;

/// Length of one auto-refresh countdown, in ticks.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u32 = 30;

/// Length of one countdown tick.
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Message published when a failed fetch carries no description.
pub const UNKNOWN_FETCH_ERROR: &str = "Unknown error while loading users";

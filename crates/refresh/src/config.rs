//! Refresh loop configuration.

use std::time::Duration;

use userfeed_core::defaults::{DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_TICK_MS, DEFAULT_USER_COUNT};

/// Tunable parameters for the refresh loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshConfig {
    /// Users requested per fetch (at least 1).
    pub user_count: u32,
    /// Countdown length in ticks between automatic fetches (at least 1).
    pub interval_secs: u32,
    /// Duration of one countdown tick.
    pub tick: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            user_count: DEFAULT_USER_COUNT,
            interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}

impl RefreshConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default |
    /// |-------------------------|---------|
    /// | `USERFEED_USER_COUNT`   | `5`     |
    /// | `USERFEED_REFRESH_SECS` | `30`    |
    /// | `USERFEED_TICK_MS`      | `1000`  |
    ///
    /// Unparseable or zero values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let user_count = positive(&lookup, "USERFEED_USER_COUNT", DEFAULT_USER_COUNT);
        let interval_secs = positive(&lookup, "USERFEED_REFRESH_SECS", DEFAULT_REFRESH_INTERVAL_SECS);
        let tick_ms = positive(&lookup, "USERFEED_TICK_MS", DEFAULT_TICK_MS);

        Self {
            user_count,
            interval_secs,
            tick: Duration::from_millis(tick_ms),
        }
    }
}

fn positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + PartialOrd + Default + Copy + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => value,
        _ => {
            tracing::warn!(key, value = %raw, default = %default, "Ignoring invalid setting");
            default
        }
    }
}

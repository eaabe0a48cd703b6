//! Plain-text rendering of the feed state.

use userfeed_core::fetch_result::FetchResult;
use userfeed_core::user::User;

/// Render the result panel.
pub fn result(result: &FetchResult) -> String {
    match result {
        FetchResult::Loading => "Loading users...".to_string(),
        FetchResult::Success(users) if users.is_empty() => "No users returned.".to_string(),
        FetchResult::Success(users) => users
            .iter()
            .enumerate()
            .map(|(i, user)| self::user(i + 1, user))
            .collect::<Vec<_>>()
            .join("\n"),
        FetchResult::Error(message) => format!("Error: {message}\nPress 'r' + Enter to retry."),
    }
}

/// One user card: name on the first line, contact and place indented below.
pub fn user(position: usize, user: &User) -> String {
    format!(
        "{position}. {}\n   {} | {}\n   {}, {}",
        user.full_name(),
        user.email,
        user.phone,
        user.location.city,
        user.location.country,
    )
}

/// Render the timer line.
pub fn timer(seconds_until_refresh: u32, auto_refresh_enabled: bool) -> String {
    if auto_refresh_enabled {
        format!("Next refresh in {seconds_until_refresh}s")
    } else {
        "Auto-refresh paused".to_string()
    }
}

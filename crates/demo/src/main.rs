//! `userfeed-demo` -- terminal front end for the random-user feed.
//!
//! Starts a [`RefreshController`] against the random-user API, prints
//! the user list whenever a fetch completes, and shows the countdown.
//! Commands are read from stdin, one per line: `r` fetches now, `t`
//! toggles auto-refresh, `q` quits. Ctrl-C also quits.
//!
//! # Environment variables
//!
//! | Variable                | Default                 | Description                    |
//! |-------------------------|-------------------------|--------------------------------|
//! | `RANDOMUSER_BASE_URL`   | `https://randomuser.me` | API host                       |
//! | `USERFEED_USER_COUNT`   | `5`                     | Users per fetch                |
//! | `USERFEED_REFRESH_SECS` | `30`                    | Seconds between auto-refreshes |
//! | `USERFEED_TICK_MS`      | `1000`                  | Length of one countdown tick   |

mod command;
mod render;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userfeed_core::defaults::DEFAULT_BASE_URL;
use userfeed_randomuser::api::RandomUserApi;
use userfeed_refresh::config::RefreshConfig;
use userfeed_refresh::controller::RefreshController;

use crate::command::Command;

/// Countdown values at or below this are always printed.
const COUNTDOWN_VERBOSE_BELOW: u32 = 3;

/// Otherwise print the countdown every this many seconds.
const COUNTDOWN_PRINT_EVERY: u32 = 10;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "userfeed_demo=info,userfeed_refresh=info,userfeed_randomuser=info";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url =
        std::env::var("RANDOMUSER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let config = RefreshConfig::from_env();

    tracing::info!(
        base_url = %base_url,
        user_count = config.user_count,
        interval_secs = config.interval_secs,
        tick = ?config.tick,
        "Starting userfeed-demo",
    );

    let api = RandomUserApi::new(base_url);
    let controller = RefreshController::new(Arc::new(api), config);

    let mut result_rx = controller.result();
    let mut countdown_rx = controller.seconds_until_refresh();
    let mut enabled_rx = controller.auto_refresh_enabled();

    controller.start();
    println!("Commands: r = refresh now, t = toggle auto-refresh, q = quit");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted");
                break;
            }
            Ok(()) = result_rx.changed() => {
                println!("{}", render::result(&result_rx.borrow_and_update()));
            }
            Ok(()) = countdown_rx.changed() => {
                let seconds = *countdown_rx.borrow_and_update();
                if seconds <= COUNTDOWN_VERBOSE_BELOW || seconds % COUNTDOWN_PRINT_EVERY == 0 {
                    println!("{}", render::timer(seconds, *enabled_rx.borrow()));
                }
            }
            Ok(()) = enabled_rx.changed() => {
                let enabled = *enabled_rx.borrow_and_update();
                println!("{}", render::timer(*countdown_rx.borrow(), enabled));
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match Command::parse(&line) {
                    Some(Command::Refresh) => controller.fetch_now(),
                    Some(Command::Toggle) => {
                        controller.toggle_auto_refresh();
                    }
                    Some(Command::Quit) => break,
                    None => println!("Unknown command {:?} (use r, t or q)", line.trim()),
                },
                Ok(None) => {
                    tracing::debug!("stdin closed, waiting for Ctrl-C");
                    stdin_open = false;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read stdin");
                    stdin_open = false;
                }
            },
        }
    }

    controller.shutdown().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_covers_every_workspace_crate() {
        for target in ["userfeed_demo", "userfeed_refresh", "userfeed_randomuser"] {
            assert!(
                DEFAULT_LOG_FILTER.contains(&format!("{target}=info")),
                "{target} missing from default filter"
            );
        }
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}

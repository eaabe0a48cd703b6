//! The refresh controller and its perpetual fetch/countdown loop.
//!
//! [`RefreshController`] is the single owner of the feed state:
//!
//! * `result` -- the tagged outcome of the latest fetch,
//! * `seconds_until_refresh` -- the countdown shown to the user,
//! * `auto_refresh_enabled` -- the toggle, `true` by default.
//!
//! Each field lives in its own [`watch`] channel so presentation can
//! observe them independently. Every publication is also broadcast as a
//! [`RefreshEvent`]; call [`RefreshController::subscribe`] to receive them.
//!
//! The loop is a small state machine (`LoopState`) stepped on a Tokio
//! task. Every step races the controller's [`CancellationToken`], so
//! [`RefreshController::shutdown`] (or dropping the controller) stops the
//! loop at its next suspension point and discards any in-flight fetch.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use userfeed_core::defaults::UNKNOWN_FETCH_ERROR;
use userfeed_core::fetch_result::FetchResult;

use crate::config::RefreshConfig;
use crate::events::{FetchTrigger, RefreshEvent};
use crate::source::UserSource;

/// Broadcast channel capacity for controller events.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// How long [`RefreshController::shutdown`] waits for the loop task.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Point-in-time copy of all three observable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSnapshot {
    pub result: FetchResult,
    pub seconds_until_refresh: u32,
    pub auto_refresh_enabled: bool,
}

/// States of the refresh loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    /// Auto-refresh is off; poll the toggle once per tick.
    IdleDisabled,
    /// A scheduled fetch is about to run.
    Fetching,
    /// Countdown showing `n` ticks until the next fetch.
    Counting(u32),
}

/// Owns the feed state and drives the automatic refresh cycle.
///
/// Construct with [`new`](Self::new), then call [`start`](Self::start)
/// from inside a Tokio runtime.
pub struct RefreshController {
    shared: Arc<Shared>,
    /// Handle of the loop task; `Some` once started.
    loop_task: Mutex<Option<JoinHandle<()>>>,
}

/// State shared between the controller handle, the loop task, and
/// manual fetch tasks.
struct Shared {
    source: Arc<dyn UserSource>,
    config: RefreshConfig,
    result_tx: watch::Sender<FetchResult>,
    countdown_tx: watch::Sender<u32>,
    auto_refresh_tx: watch::Sender<bool>,
    event_tx: broadcast::Sender<RefreshEvent>,
    cancel: CancellationToken,
}

impl RefreshController {
    /// Create a controller with `result = Loading`, the countdown at the
    /// full interval, and auto-refresh enabled. Nothing runs until
    /// [`start`](Self::start) is called.
    pub fn new(source: Arc<dyn UserSource>, config: RefreshConfig) -> Self {
        let (result_tx, _) = watch::channel(FetchResult::Loading);
        let (countdown_tx, _) = watch::channel(config.interval_secs);
        let (auto_refresh_tx, _) = watch::channel(true);
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            shared: Arc::new(Shared {
                source,
                config,
                result_tx,
                countdown_tx,
                auto_refresh_tx,
                event_tx,
                cancel: CancellationToken::new(),
            }),
            loop_task: Mutex::new(None),
        }
    }

    /// Spawn the refresh loop on the current Tokio runtime.
    ///
    /// Returns `true` if this call started the loop. Later calls, and
    /// calls after [`shutdown`](Self::shutdown), are no-ops returning
    /// `false`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start(&self) -> bool {
        let mut slot = self.loop_task.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            tracing::debug!("Refresh loop already running");
            return false;
        }
        if self.shared.cancel.is_cancelled() {
            tracing::warn!("Refresh controller is shut down, not starting loop");
            return false;
        }

        let shared = Arc::clone(&self.shared);
        *slot = Some(tokio::spawn(run_refresh_loop(shared)));
        true
    }

    /// Whether the loop task is alive.
    pub fn is_running(&self) -> bool {
        self.loop_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Fetch immediately, outside the countdown schedule.
    ///
    /// Runs on its own task and leaves the countdown untouched. It may
    /// race a scheduled fetch; whichever finishes last sets `result`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn fetch_now(&self) {
        if self.shared.cancel.is_cancelled() {
            tracing::debug!("Ignoring manual fetch after shutdown");
            return;
        }
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            shared.fetch(FetchTrigger::Manual).await;
        });
    }

    /// Flip auto-refresh and return the new value.
    ///
    /// The loop observes the change at its next tick: a running
    /// countdown stops, an idle loop starts a fetch.
    pub fn toggle_auto_refresh(&self) -> bool {
        let mut enabled = false;
        self.shared.auto_refresh_tx.send_modify(|value| {
            *value = !*value;
            enabled = *value;
        });
        tracing::info!(enabled, "Auto-refresh toggled");
        enabled
    }

    /// Observe the latest fetch outcome.
    pub fn result(&self) -> watch::Receiver<FetchResult> {
        self.shared.result_tx.subscribe()
    }

    /// Observe the countdown value.
    pub fn seconds_until_refresh(&self) -> watch::Receiver<u32> {
        self.shared.countdown_tx.subscribe()
    }

    /// Observe the auto-refresh toggle.
    pub fn auto_refresh_enabled(&self) -> watch::Receiver<bool> {
        self.shared.auto_refresh_tx.subscribe()
    }

    /// Subscribe to every state publication, in order.
    pub fn subscribe(&self) -> broadcast::Receiver<RefreshEvent> {
        self.shared.event_tx.subscribe()
    }

    /// Copy the current value of all three observables.
    pub fn snapshot(&self) -> RefreshSnapshot {
        RefreshSnapshot {
            result: self.shared.result_tx.borrow().clone(),
            seconds_until_refresh: *self.shared.countdown_tx.borrow(),
            auto_refresh_enabled: *self.shared.auto_refresh_tx.borrow(),
        }
    }

    /// Stop the loop and abandon any in-flight fetch.
    ///
    /// Waits up to 5 seconds for the loop task to exit. Results of
    /// fetches still running are never published.
    pub async fn shutdown(&self) {
        tracing::info!("Shutting down refresh controller");
        self.shared.cancel.cancel();

        let handle = self
            .loop_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await.is_err() {
                tracing::warn!("Refresh loop did not stop in time");
            }
        }

        tracing::info!("Refresh controller shut down complete");
    }
}

impl Drop for RefreshController {
    fn drop(&mut self) {
        self.shared.cancel.cancel();
    }
}

/// Step the state machine until the cancellation token fires.
async fn run_refresh_loop(shared: Arc<Shared>) {
    let mut state = shared.initial_state();
    tracing::info!(?state, "Refresh loop started");

    loop {
        tokio::select! {
            _ = shared.cancel.cancelled() => break,
            next = shared.step(state) => {
                if next != state && !matches!(next, LoopState::Counting(_)) {
                    tracing::debug!(from = ?state, to = ?next, "Refresh loop transition");
                }
                state = next;
            }
        }
    }

    tracing::info!("Refresh loop stopped");
}

impl Shared {
    fn auto_refresh_enabled(&self) -> bool {
        *self.auto_refresh_tx.borrow()
    }

    fn initial_state(&self) -> LoopState {
        if self.auto_refresh_enabled() {
            LoopState::Fetching
        } else {
            LoopState::IdleDisabled
        }
    }

    /// Run one state and return the next.
    async fn step(&self, state: LoopState) -> LoopState {
        match state {
            LoopState::Fetching => {
                self.fetch(FetchTrigger::Scheduled).await;
                LoopState::Counting(self.config.interval_secs)
            }
            LoopState::Counting(n) => {
                self.countdown_tx.send_replace(n);
                self.emit(RefreshEvent::Countdown { seconds: n });
                tokio::time::sleep(self.config.tick).await;

                if !self.auto_refresh_enabled() {
                    LoopState::IdleDisabled
                } else if n > 1 {
                    LoopState::Counting(n - 1)
                } else {
                    LoopState::Fetching
                }
            }
            LoopState::IdleDisabled => {
                tokio::time::sleep(self.config.tick).await;
                if self.auto_refresh_enabled() {
                    LoopState::Fetching
                } else {
                    LoopState::IdleDisabled
                }
            }
        }
    }

    /// Publish `Loading`, call the source, publish the outcome.
    ///
    /// Returns without publishing if the controller is cancelled while
    /// the source is pending.
    async fn fetch(&self, trigger: FetchTrigger) {
        // A manual fetch spawned just before teardown may only run now.
        if self.cancel.is_cancelled() {
            tracing::debug!(?trigger, "Skipping fetch after shutdown");
            return;
        }
        self.result_tx.send_replace(FetchResult::Loading);
        self.emit(RefreshEvent::FetchStarted { trigger });
        tracing::debug!(?trigger, count = self.config.user_count, "Fetching users");

        let outcome = tokio::select! {
            _ = self.cancel.cancelled() => None,
            outcome = self.source.fetch_users(self.config.user_count) => Some(outcome),
        };
        let Some(outcome) = outcome.filter(|_| !self.cancel.is_cancelled()) else {
            tracing::debug!(?trigger, "Discarding fetch after shutdown");
            return;
        };

        match outcome {
            Ok(users) => {
                let count = users.len();
                tracing::info!(?trigger, count, "Users loaded");
                self.result_tx.send_replace(FetchResult::Success(users));
                self.emit(RefreshEvent::FetchSucceeded { trigger, count });
            }
            Err(e) => {
                let message = if e.message.trim().is_empty() {
                    UNKNOWN_FETCH_ERROR.to_string()
                } else {
                    e.message
                };
                tracing::warn!(?trigger, error = %message, "Failed to load users");
                self.result_tx.send_replace(FetchResult::Error(message.clone()));
                self.emit(RefreshEvent::FetchFailed { trigger, message });
            }
        }
    }

    fn emit(&self, event: RefreshEvent) {
        // Ignore the SendError -- it only means there are zero receivers.
        let _ = self.event_tx.send(event);
    }
}

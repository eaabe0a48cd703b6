use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, Notify};
use userfeed_core::user::{Location, Name, Picture, User};
use userfeed_refresh::config::RefreshConfig;
use userfeed_refresh::controller::RefreshController;
use userfeed_refresh::events::RefreshEvent;
use userfeed_refresh::source::{FetchError, UserSource};

/// Build a user whose first name is `First{index}`.
pub fn user(index: usize) -> User {
    User {
        name: Name {
            title: "Mr".to_string(),
            first: format!("First{index}"),
            last: format!("Last{index}"),
        },
        email: format!("user{index}@example.com"),
        phone: format!("555-01{index:02}"),
        picture: Picture {
            large: format!("https://img.example/large/{index}.jpg"),
            medium: format!("https://img.example/med/{index}.jpg"),
            thumbnail: format!("https://img.example/thumb/{index}.jpg"),
        },
        location: Location {
            city: "Porto".to_string(),
            country: "Portugal".to_string(),
        },
    }
}

pub fn users(count: usize) -> Vec<User> {
    (0..count).map(user).collect()
}

/// Returns `count` users immediately and counts calls.
pub struct StaticSource {
    users: Vec<User>,
    pub calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(count: usize) -> Self {
        Self {
            users: users(count),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl UserSource for StaticSource {
    async fn fetch_users(&self, count: u32) -> Result<Vec<User>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.iter().take(count as usize).cloned().collect())
    }
}

/// Always fails with the given message.
pub struct FailingSource(pub String);

#[async_trait]
impl UserSource for FailingSource {
    async fn fetch_users(&self, _count: u32) -> Result<Vec<User>, FetchError> {
        Err(FetchError::new(self.0.clone()))
    }
}

/// Blocks every fetch until [`GatedSource::release`] is called.
pub struct GatedSource {
    gate: Notify,
    users: Vec<User>,
}

impl GatedSource {
    pub fn new(count: usize) -> Self {
        Self {
            gate: Notify::new(),
            users: users(count),
        }
    }

    /// Let one pending (or the next) fetch complete.
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl UserSource for GatedSource {
    async fn fetch_users(&self, _count: u32) -> Result<Vec<User>, FetchError> {
        self.gate.notified().await;
        Ok(self.users.clone())
    }
}

pub fn controller_with(source: Arc<dyn UserSource>) -> RefreshController {
    RefreshController::new(source, RefreshConfig::default())
}

/// Receive the next event, failing the test instead of hanging.
pub async fn next_event(events: &mut broadcast::Receiver<RefreshEvent>) -> RefreshEvent {
    tokio::time::timeout(Duration::from_secs(120), events.recv())
        .await
        .expect("timed out waiting for a refresh event")
        .expect("event channel closed or lagged")
}

/// Skip events until `Countdown { seconds }` arrives.
pub async fn wait_for_countdown(events: &mut broadcast::Receiver<RefreshEvent>, seconds: u32) {
    loop {
        if next_event(events).await == (RefreshEvent::Countdown { seconds }) {
            return;
        }
    }
}

/// Discard everything currently buffered.
pub fn drain(events: &mut broadcast::Receiver<RefreshEvent>) {
    while events.try_recv().is_ok() {}
}

//! End-to-end: the controller driving a real [`RandomUserApi`] against an
//! in-process HTTP stub, on the real clock with a short tick.

mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use userfeed_core::fetch_result::FetchResult;
use userfeed_core::user::UsersResponse;
use userfeed_randomuser::api::RandomUserApi;
use userfeed_refresh::config::RefreshConfig;
use userfeed_refresh::controller::RefreshController;
use userfeed_refresh::events::{FetchTrigger, RefreshEvent};

use common::{next_event, users};

async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn fast_config() -> RefreshConfig {
    RefreshConfig {
        tick: Duration::from_millis(10),
        ..RefreshConfig::default()
    }
}

#[tokio::test]
async fn five_well_formed_users_become_success() {
    let router = Router::new().route(
        "/api/",
        get(|| async {
            Json(UsersResponse {
                results: users(5),
            })
        }),
    );
    let base = spawn_stub(router).await;
    let controller = RefreshController::new(Arc::new(RandomUserApi::new(base)), fast_config());
    let mut events = controller.subscribe();
    controller.start();

    assert_matches!(next_event(&mut events).await, RefreshEvent::FetchStarted { .. });
    assert_eq!(
        next_event(&mut events).await,
        RefreshEvent::FetchSucceeded {
            trigger: FetchTrigger::Scheduled,
            count: 5,
        }
    );
    assert_eq!(controller.snapshot().result, FetchResult::Success(users(5)));

    controller.shutdown().await;
}

#[tokio::test]
async fn http_error_becomes_error_result_and_countdown_starts() {
    let router = Router::new().route(
        "/api/",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
    );
    let base = spawn_stub(router).await;
    let controller = RefreshController::new(Arc::new(RandomUserApi::new(base)), fast_config());
    let mut events = controller.subscribe();
    controller.start();

    assert_matches!(next_event(&mut events).await, RefreshEvent::FetchStarted { .. });
    assert_matches!(
        next_event(&mut events).await,
        RefreshEvent::FetchFailed { message, .. } if message.contains("500")
    );
    assert_eq!(
        next_event(&mut events).await,
        RefreshEvent::Countdown { seconds: 30 }
    );
    assert_matches!(
        controller.snapshot().result,
        FetchResult::Error(message) if !message.is_empty()
    );

    controller.shutdown().await;
}

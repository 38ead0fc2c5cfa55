//! Webhook and health route behavior.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sigscout::adapter::inbound::http::{router, WebhookState};
use sigscout::adapter::inbound::telegram::{AllowList, Dispatcher};
use sigscout::app::SignalGenerator;
use sigscout::domain::ScreenConfig;
use sigscout::port::outbound::NullNotifier;
use sigscout::testkit::{MemoryStore, ScriptedFeed};
use teloxide::Bot;
use tower::ServiceExt;

fn test_state(
    feed: Arc<ScriptedFeed>,
    store: Arc<MemoryStore>,
) -> Arc<WebhookState<ScriptedFeed, MemoryStore>> {
    let generator = SignalGenerator::new(
        feed,
        store.clone(),
        Arc::new(NullNotifier),
        ScreenConfig::default(),
    );
    let dispatcher = Dispatcher::new(generator, store, AllowList::new([42]));

    Arc::new(WebhookState {
        bot: Bot::new("123456:TEST-TOKEN"),
        dispatcher,
    })
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_route_reports_liveness() {
    let feed = Arc::new(ScriptedFeed::new(vec![]));
    let store = Arc::new(MemoryStore::new());
    let app = router(test_state(feed, store));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "Bot is running!");
}

#[tokio::test]
async fn malformed_webhook_payload_still_gets_ok() {
    let feed = Arc::new(ScriptedFeed::new(vec![]));
    let store = Arc::new(MemoryStore::new());
    let app = router(test_state(feed.clone(), store));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .body(Body::from("this is not an update"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
    assert_eq!(feed.calls(), 0);
}

#[tokio::test]
async fn ignorable_update_gets_ok_without_side_effects() {
    let feed = Arc::new(ScriptedFeed::new(vec![]));
    let store = Arc::new(MemoryStore::new());
    let app = router(test_state(feed.clone(), store.clone()));

    // Valid update envelope, but plain text from an unauthorized chat:
    // nothing to do, nothing to send.
    let update = serde_json::json!({
        "update_id": 9,
        "message": {
            "message_id": 900,
            "date": 1721000000,
            "chat": {"id": 666, "type": "private", "first_name": "Mallory"},
            "from": {"id": 666, "is_bot": false, "first_name": "Mallory"},
            "text": "gm"
        }
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header("content-type", "application/json")
                .body(Body::from(update.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
    assert_eq!(feed.calls(), 0);
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let feed = Arc::new(ScriptedFeed::new(vec![]));
    let store = Arc::new(MemoryStore::new());
    let app = router(test_state(feed, store));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

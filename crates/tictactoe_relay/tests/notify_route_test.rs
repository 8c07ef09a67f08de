//! Tests for the relay HTTP endpoints using the `Router::oneshot` pattern.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tictactoe_relay::{AppState, RelayConfig, router};
use tower::ServiceExt;

/// Requests seen by the mock Telegram API: `(bot path segment, body)`.
type Captured = Arc<Mutex<Vec<(String, Value)>>>;

/// Starts a fake Telegram API on an ephemeral port answering with `status`.
async fn mock_telegram(status: StatusCode) -> (String, Captured) {
    let captured: Captured = Arc::default();

    async fn send_message(
        State((captured, status)): State<(Captured, StatusCode)>,
        Path(bot): Path<String>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        captured.lock().unwrap().push((bot, body));
        (status, Json(json!({ "ok": status.is_success() })))
    }

    let app = Router::new()
        .route("/{bot}/sendMessage", post(send_message))
        .with_state((captured.clone(), status));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock Telegram");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), captured)
}

fn configured_router(api_base: &str) -> Router {
    let config = RelayConfig::default()
        .with_credentials("42:secret", "-1001")
        .with_api_base(api_base);
    router(AppState::from_config(config))
}

fn notify_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/notify")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_win_is_forwarded_with_code() {
    let (base, captured) = mock_telegram(StatusCode::OK).await;
    let app = configured_router(&base);

    let response = app
        .oneshot(notify_request(r#"{"type":"win","promoCode":"12345"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "success": true, "message": "Notification sent" })
    );

    let seen = captured.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "bot42:secret");
    assert_eq!(seen[0].1["chat_id"], "-1001");
    assert_eq!(seen[0].1["text"], "Win! Promo code issued: 12345");
}

#[tokio::test]
async fn test_loss_is_forwarded() {
    let (base, captured) = mock_telegram(StatusCode::OK).await;
    let app = configured_router(&base);

    let response = app
        .oneshot(notify_request(r#"{"type":"loss"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(captured.lock().unwrap()[0].1["text"], "Lost");
}

#[tokio::test]
async fn test_telegram_rejection_is_500() {
    let (base, captured) = mock_telegram(StatusCode::BAD_REQUEST).await;
    let app = configured_router(&base);

    let response = app
        .oneshot(notify_request(r#"{"type":"loss"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "success": false, "message": "Failed to send notification" })
    );
    assert_eq!(captured.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unreachable_telegram_is_500() {
    // Nothing listens on the discard port.
    let app = configured_router("http://127.0.0.1:9");

    let response = app
        .oneshot(notify_request(r#"{"type":"win","promoCode":"12345"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_silent_telegram_times_out_with_500() {
    async fn never_answer() -> StatusCode {
        std::future::pending::<()>().await;
        StatusCode::OK
    }

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/{bot}/sendMessage", post(never_answer));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = RelayConfig::default()
        .with_credentials("42:secret", "-1001")
        .with_api_base(format!("http://{}", addr))
        .with_telegram_timeout(Duration::from_millis(200));

    let response = tokio::time::timeout(
        Duration::from_secs(5),
        router(AppState::from_config(config)).oneshot(notify_request(r#"{"type":"loss"}"#)),
    )
    .await
    .expect("relay answered before the outer deadline")
    .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["success"], json!(false));
}

#[tokio::test]
async fn test_missing_credentials_is_500_without_request() {
    let (base, captured) = mock_telegram(StatusCode::OK).await;
    let app = router(AppState::from_config(
        RelayConfig::default().with_api_base(base),
    ));

    let response = app
        .oneshot(notify_request(r#"{"type":"loss"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["success"], false);
    assert!(captured.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_payloads_are_400() {
    let (base, captured) = mock_telegram(StatusCode::OK).await;

    for body in [
        r#"{"type":"draw"}"#,
        r#"{"promoCode":"12345"}"#,
        r#"{"type":"win","promoCode":12345}"#,
        "not json",
    ] {
        let response = configured_router(&base)
            .oneshot(notify_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        let json = json_body(response).await;
        assert_eq!(json["error"], "Invalid request");
        assert!(json["details"].is_string());
    }

    assert!(captured.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_health() {
    let app = router(AppState::from_config(RelayConfig::default()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_notify_rejects_get() {
    let app = router(AppState::from_config(RelayConfig::default()));

    let response = app
        .oneshot(Request::builder().uri("/api/notify").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

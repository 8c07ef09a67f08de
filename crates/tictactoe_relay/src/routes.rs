//! HTTP routes for the relay.

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::notification::{NotifyRequest, NotifyResponse};
use crate::telegram::TelegramClient;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use derive_new::new;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument};

/// Shared state handed to every handler.
#[derive(Debug, Clone, new)]
pub struct AppState {
    config: Arc<RelayConfig>,
    http: reqwest::Client,
}

impl AppState {
    /// State with a default HTTP client.
    pub fn from_config(config: RelayConfig) -> Self {
        Self::new(Arc::new(config), reqwest::Client::new())
    }
}

/// Builds the relay router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/notify", post(notify))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().layer(middleware::from_fn(log_api_requests)))
        .with_state(state)
}

/// Logs method, path, status and latency of `/api` calls.
async fn log_api_requests(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    if !path.starts_with("/api") {
        return next.run(req).await;
    }

    let method = req.method().clone();
    let started = tokio::time::Instant::now();
    let response = next.run(req).await;
    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Handled API request"
    );
    response
}

/// `POST /api/notify`: forwards one outcome to Telegram.
#[instrument(skip_all)]
async fn notify(
    State(state): State<AppState>,
    payload: Result<Json<NotifyRequest>, JsonRejection>,
) -> Result<Json<NotifyResponse>, RelayError> {
    let Json(request) = payload.map_err(|rejection| RelayError::validation(rejection.body_text()))?;
    debug!(kind = %request.kind, has_code = request.promo_code.is_some(), "Notification received");

    let client = TelegramClient::from_config(&state.config, state.http.clone())?;
    client.send_message(&request.message_text()).await?;

    info!(kind = %request.kind, "Notification forwarded");
    Ok(Json(NotifyResponse::sent()))
}

/// `GET /health`.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

//! Relay server entry point.

use crate::config::RelayConfig;
use crate::routes::{AppState, router};
use tracing::{info, warn};

/// Binds the configured address and serves until the process exits.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(config: RelayConfig) -> std::io::Result<()> {
    if config.credentials().is_none() {
        warn!("Telegram credentials not configured; notifications will fail");
    }

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(
        addr = %listener.local_addr()?,
        "Notification relay listening"
    );

    let app = router(AppState::from_config(config));
    let result = axum::serve(listener, app).await;
    info!(?result, "Relay exited");
    result
}

//! Delivery of round outcomes to the notification relay.

use std::time::Duration;
use tictactoe_engine::OutcomeEvent;
use tictactoe_relay::{NotificationKind, NotifyRequest, NotifyResponse};
use tracing::{debug, info, instrument, warn};

/// Reports finished rounds to the outside world.
///
/// Implementations report success as a plain `bool`; callers never retry
/// and a failure never affects the game.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one outcome. Returns `true` if it was accepted.
    async fn notify(&self, event: &OutcomeEvent) -> bool;
}

/// Upper bound on one relay request.
pub const DEFAULT_RELAY_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds the relay payload for an outcome.
pub fn notify_request(event: &OutcomeEvent) -> NotifyRequest {
    match event {
        OutcomeEvent::Win { promo_code } => {
            NotifyRequest::new(NotificationKind::Win, Some(promo_code.to_string()))
        }
        OutcomeEvent::Loss => NotifyRequest::new(NotificationKind::Loss, None),
    }
}

/// Posts outcomes to `{relay_url}/api/notify`.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpNotifier {
    /// Creates a notifier for the relay at `relay_url`.
    #[instrument(skip(relay_url), fields(relay_url = %relay_url.as_ref()))]
    pub fn new(relay_url: impl AsRef<str>) -> Self {
        Self::with_client(reqwest::Client::new(), relay_url)
    }

    /// Creates a notifier reusing an existing HTTP client.
    pub fn with_client(client: reqwest::Client, relay_url: impl AsRef<str>) -> Self {
        let endpoint = format!("{}/api/notify", relay_url.as_ref().trim_end_matches('/'));
        debug!(endpoint = %endpoint, "Created relay notifier");
        Self {
            client,
            endpoint,
            timeout: DEFAULT_RELAY_TIMEOUT,
        }
    }

    /// Replaces the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL notifications are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Notifier for HttpNotifier {
    #[instrument(skip(self, event), fields(kind = event.kind()))]
    async fn notify(&self, event: &OutcomeEvent) -> bool {
        let response = match self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&notify_request(event))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "Relay timed out");
                return false;
            }
            Err(e) => {
                warn!(error = %e, "Relay unreachable");
                return false;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Relay rejected notification");
            return false;
        }

        match response.json::<NotifyResponse>().await {
            Ok(body) if body.success => {
                info!("Notification delivered");
                true
            }
            Ok(body) => {
                warn!(message = %body.message, "Relay reported failure");
                false
            }
            Err(e) => {
                warn!(error = %e, "Unreadable relay response");
                false
            }
        }
    }
}

/// Used when no relay is configured. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

#[async_trait::async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, event: &OutcomeEvent) -> bool {
        debug!(kind = event.kind(), "No relay configured, notification dropped");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::PromoCode;

    #[test]
    fn test_request_for_win_carries_code() {
        let code = PromoCode::parse("48213").unwrap();
        let request = notify_request(&OutcomeEvent::Win { promo_code: code });
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "type": "win", "promoCode": "48213" })
        );
    }

    #[test]
    fn test_request_for_loss_has_no_code() {
        let request = notify_request(&OutcomeEvent::Loss);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "type": "loss" })
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let notifier = HttpNotifier::new("http://relay.local:5000/");
        assert_eq!(notifier.endpoint(), "http://relay.local:5000/api/notify");
    }

    #[test]
    fn test_default_timeout_is_bounded() {
        let notifier = HttpNotifier::new("http://relay.local:5000");
        assert_eq!(notifier.timeout, DEFAULT_RELAY_TIMEOUT);
        let notifier = notifier.with_timeout(Duration::from_millis(250));
        assert_eq!(notifier.timeout, Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_disabled_notifier_reports_failure() {
        assert!(!DisabledNotifier.notify(&OutcomeEvent::Loss).await);
    }
}

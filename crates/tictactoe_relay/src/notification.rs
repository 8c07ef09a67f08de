//! Notification payloads accepted by `POST /api/notify`.

use derive_new::new;
use serde::{Deserialize, Serialize};

/// Which outcome is being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    /// The player won.
    Win,
    /// The player lost.
    Loss,
}

/// Body of `POST /api/notify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct NotifyRequest {
    /// Outcome being reported.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Promo code issued with a win.
    #[serde(
        rename = "promoCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub promo_code: Option<String>,
}

impl NotifyRequest {
    /// Text sent to the Telegram chat.
    pub fn message_text(&self) -> String {
        match (self.kind, &self.promo_code) {
            (NotificationKind::Win, Some(code)) => format!("Win! Promo code issued: {}", code),
            (NotificationKind::Win, None) => "Win!".to_string(),
            (NotificationKind::Loss, _) => "Lost".to_string(),
        }
    }
}

/// Body returned by `POST /api/notify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyResponse {
    /// Whether the message reached Telegram.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
}

impl NotifyResponse {
    /// Response for a delivered notification.
    pub fn sent() -> Self {
        Self {
            success: true,
            message: "Notification sent".to_string(),
        }
    }
}

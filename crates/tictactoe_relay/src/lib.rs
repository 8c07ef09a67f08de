//! Notification relay for tic-tac-toe outcomes.
//!
//! Accepts `POST /api/notify` with a `{"type": "win" | "loss", "promoCode": ...}`
//! body and forwards a short message to a Telegram chat.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod notification;
mod routes;
mod server;
mod telegram;

pub use config::{API_BASE_VAR, BOT_TOKEN_VAR, CHAT_ID_VAR, ConfigError, PORT_VAR, RelayConfig};
pub use error::{RelayError, RelayErrorKind};
pub use notification::{NotificationKind, NotifyRequest, NotifyResponse};
pub use routes::{AppState, router};
pub use server::serve;
pub use telegram::TelegramClient;

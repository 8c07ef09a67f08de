//! Telegram Bot API client.

use crate::config::RelayConfig;
use crate::error::RelayError;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Body of `sendMessage`.
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Sends plain-text messages to one chat.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
    timeout: Duration,
}

impl TelegramClient {
    /// Builds a client from relay configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the bot token or chat id is
    /// missing; no request is attempted in that case.
    #[instrument(skip_all)]
    pub fn from_config(config: &RelayConfig, http: reqwest::Client) -> Result<Self, RelayError> {
        let (bot_token, chat_id) = config.credentials().ok_or_else(|| {
            error!("Telegram credentials not configured");
            RelayError::configuration("Telegram credentials not configured")
        })?;
        Ok(Self {
            http,
            api_base: config.telegram_api_base().trim_end_matches('/').to_string(),
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
            timeout: config.telegram_timeout(),
        })
    }

    /// `sendMessage` endpoint for this bot.
    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }

    /// Sends `text` to the configured chat.
    ///
    /// # Errors
    ///
    /// Returns a delivery error if the request fails, times out, or Telegram
    /// answers with a non-success status. The error text never includes the
    /// bot token.
    #[instrument(skip(self, text), fields(chat_id = %self.chat_id))]
    pub async fn send_message(&self, text: &str) -> Result<(), RelayError> {
        debug!("Sending Telegram message");
        let response = self
            .http
            .post(self.endpoint())
            .timeout(self.timeout)
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!(error = %e, "Telegram request failed");
                RelayError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, response = %body, "Telegram API error");
            return Err(RelayError::delivery(format!(
                "Telegram API error {}: {}",
                status, body
            )));
        }

        info!("Telegram message delivered");
        Ok(())
    }
}

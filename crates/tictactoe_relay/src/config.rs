//! Relay configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Environment variable holding the Telegram bot token.
pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
/// Environment variable holding the destination chat id.
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";
/// Environment variable overriding the Telegram API base URL.
pub const API_BASE_VAR: &str = "TELEGRAM_API_BASE";
/// Environment variable holding the listen port.
pub const PORT_VAR: &str = "PORT";

/// Configuration for the notification relay.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// Telegram bot token.
    #[serde(default)]
    telegram_bot_token: Option<String>,

    /// Telegram chat receiving the messages.
    #[serde(default)]
    telegram_chat_id: Option<String>,

    /// Telegram Bot API base URL.
    #[serde(default = "default_api_base")]
    telegram_api_base: String,

    /// Upper bound on one Telegram request, in milliseconds.
    #[serde(default = "default_telegram_timeout_ms")]
    telegram_timeout_ms: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_telegram_timeout_ms() -> u64 {
    10_000
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            telegram_bot_token: None,
            telegram_chat_id: None,
            telegram_api_base: default_api_base(),
            telegram_timeout_ms: default_telegram_timeout_ms(),
        }
    }
}

impl RelayConfig {
    /// Reads configuration from the process environment.
    #[instrument]
    pub fn from_env() -> Self {
        Self::default().with_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from a TOML file, filling unset credentials from
    /// the environment.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading relay config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(port = config.port, "Config loaded successfully");
        Ok(config.with_lookup(|key| std::env::var(key).ok()))
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Fills fields from `lookup`.
    ///
    /// Credentials and API base are only taken when not already set; `PORT`
    /// always wins, as deployment platforms assign it.
    pub fn with_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if self.telegram_bot_token.is_none() {
            self.telegram_bot_token = non_empty(BOT_TOKEN_VAR);
        }
        if self.telegram_chat_id.is_none() {
            self.telegram_chat_id = non_empty(CHAT_ID_VAR);
        }
        if let Some(base) = non_empty(API_BASE_VAR) {
            self.telegram_api_base = base;
        }
        if let Some(port) = non_empty(PORT_VAR) {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => warn!(value = %port, "Ignoring unparseable PORT"),
            }
        }
        self
    }

    /// Overrides the bind address.
    pub fn with_address(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Sets Telegram credentials directly.
    pub fn with_credentials(
        mut self,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        self.telegram_bot_token = Some(bot_token.into());
        self.telegram_chat_id = Some(chat_id.into());
        self
    }

    /// Sets the Telegram API base URL.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.telegram_api_base = base.into();
        self
    }

    /// Sets the per-request Telegram timeout.
    pub fn with_telegram_timeout(mut self, timeout: Duration) -> Self {
        self.telegram_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Per-request Telegram timeout.
    pub fn telegram_timeout(&self) -> Duration {
        Duration::from_millis(self.telegram_timeout_ms)
    }

    /// Bot token and chat id, when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((
            self.telegram_bot_token.as_deref()?,
            self.telegram_chat_id.as_deref()?,
        ))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

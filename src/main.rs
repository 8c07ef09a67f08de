//! tictactoe_promo - Unified CLI
//!
//! Runs either the notification relay or the terminal game.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tictactoe_promo::{
    DisabledNotifier, HttpNotifier, MatchController, MatchSession, Notifier, Theme, tui,
};
use tictactoe_relay::RelayConfig;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port, config } => run_relay(host, port, config).await,
        Command::Play {
            relay_url,
            think_ms,
            theme,
        } => run_play(relay_url, think_ms, theme).await,
    }
}

/// Run the notification relay
async fn run_relay(host: Option<String>, port: Option<u16>, config: Option<PathBuf>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match config {
        Some(path) => RelayConfig::from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RelayConfig::from_env(),
    }
    .with_address(host, port);

    info!(host = %config.host(), port = config.port(), "Starting notification relay");
    tictactoe_relay::serve(config).await?;
    Ok(())
}

/// Run the terminal game
#[instrument(skip(relay_url))]
async fn run_play(relay_url: Option<String>, think_ms: u64, theme: Theme) -> Result<()> {
    // Log to a file so output does not corrupt the terminal
    let log_file = std::fs::File::create(tui::LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    let notifier: Arc<dyn Notifier> = match relay_url {
        Some(url) => {
            info!(relay_url = %url, "Reporting outcomes to relay");
            Arc::new(HttpNotifier::new(url))
        }
        None => {
            info!("No relay configured; outcomes will not be reported");
            Arc::new(DisabledNotifier)
        }
    };

    let session = MatchSession::spawn(
        MatchController::new(),
        notifier,
        Duration::from_millis(think_ms),
    );
    tui::run_tui(session, theme).await
}

//! Command-line interface for tictactoe_promo.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_promo::Theme;

/// Tic-tac-toe against the computer, with promo codes for winners
#[derive(Parser, Debug)]
#[command(name = "tictactoe_promo")]
#[command(about = "Tic-tac-toe with promo-code notifications", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the notification relay (forwards outcomes to Telegram)
    Serve {
        /// Host to bind to (default 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (default $PORT or 5000)
        #[arg(short, long)]
        port: Option<u16>,

        /// TOML config file; environment fills unset credentials
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Play in the terminal
    Play {
        /// Relay base URL. Without it, outcomes are not reported.
        #[arg(long, env = "RELAY_URL")]
        relay_url: Option<String>,

        /// Computer think delay in milliseconds
        #[arg(long, default_value = "400")]
        think_ms: u64,

        /// Presentation theme
        #[arg(long, value_enum, default_value_t = Theme::Classic)]
        theme: Theme,
    },
}

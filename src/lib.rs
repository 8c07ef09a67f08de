//! Tic-tac-toe promo game.
//!
//! Wires the pure [`tictactoe_engine`] into an async match session, reports
//! outcomes to the [`tictactoe_relay`] and renders the match in a terminal.
//!
//! # Architecture
//!
//! - **Session**: one tokio task per match; owns the controller, the
//!   computer's think timer and notification bookkeeping
//! - **Notifier**: posts wins and losses to the relay
//! - **TUI**: ratatui front end with pluggable themes
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tictactoe_promo::{DEFAULT_THINK_DELAY, DisabledNotifier, MatchController, MatchSession};
//!
//! # async fn example() {
//! let mut session = MatchSession::spawn(
//!     MatchController::new(),
//!     Arc::new(DisabledNotifier),
//!     DEFAULT_THINK_DELAY,
//! );
//! session.player_move(4);
//! let reply = session.wait_for(|s| !s.state.computer_thinking()).await;
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod notifier;
mod session;
pub mod tui;

pub use notifier::{
    DEFAULT_RELAY_TIMEOUT, DisabledNotifier, HttpNotifier, Notifier, notify_request,
};
pub use session::{
    DEFAULT_THINK_DELAY, MatchSession, NOTIFY_DEADLINE, NotificationStatus, SessionCommand,
    SessionHandle, SessionSnapshot,
};
pub use tui::Theme;

// Engine types, so front ends need a single dependency.
pub use tictactoe_engine::{
    Board, HeuristicOpponent, Mark, MatchController, MatchState, Opponent, OutcomeEvent, Position,
    PromoCode, RoundStatus, Scoreboard, Square, TurnResult,
};

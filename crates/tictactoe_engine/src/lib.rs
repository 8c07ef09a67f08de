//! Tic-tac-toe engine: rules, computer opponent, and match state machine.
//!
//! Everything in this crate is pure and synchronous. The board is a value,
//! rule checks are free functions, and [`MatchController`] is the only
//! place state changes.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{MatchController, RoundStatus, TurnResult};
//!
//! let mut game = MatchController::new();
//! assert_eq!(game.player_move(4), TurnResult::ComputerToMove);
//! game.computer_move();
//! assert_eq!(game.state().status(), RoundStatus::Active);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod controller;
mod opponent;
mod position;
mod promo;
pub mod rules;
mod state;
mod types;

pub use controller::{COMPUTER, MatchController, PLAYER, TurnResult};
pub use opponent::{HeuristicOpponent, Opponent, completing_square, select_move};
pub use position::Position;
pub use promo::PromoCode;
pub use rules::{Line, Outcome, WINNING_LINES, apply_move, evaluate};
pub use state::{MatchState, OutcomeEvent, RoundStatus, Scoreboard};
pub use types::{Board, BoardParseError, Mark, Square};

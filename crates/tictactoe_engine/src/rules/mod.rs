//! Game rules for tic-tac-toe.
//!
//! Pure functions over [`Board`] values. Nothing here owns state; the
//! match controller composes them into turns.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{Line, WINNING_LINES, check_winner, winning_line};

use super::{Board, Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// No line completed and empty squares remain.
    Undecided,
    /// `mark` completed `line`.
    Win {
        /// Winning mark.
        mark: Mark,
        /// The first completed line in table order.
        line: Line,
    },
    /// Board full with no completed line.
    Draw,
}

/// Evaluates the board: first completed line wins, otherwise draw when full.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((mark, line)) = winning_line(board) {
        return Outcome::Win { mark, line };
    }
    if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::Undecided
    }
}

/// Places `mark` at `pos`, returning the new board.
///
/// Returns `None` when the square is taken; the board is never modified.
#[instrument(skip(board))]
pub fn apply_move(board: &Board, pos: Position, mark: Mark) -> Option<Board> {
    let next = board.place(pos, mark);
    if next.is_none() {
        debug!(position = %pos, "Square already occupied");
    }
    next
}

//! Computer opponent for tic-tac-toe.
//!
//! The heuristic is deliberately beatable. Priority, first match wins:
//!
//! 1. Complete a line the computer already holds two of.
//! 2. Block a line the player holds two of.
//! 3. Take the center.
//! 4. Take a random empty corner.
//! 5. Take a random empty square.

use super::rules::WINNING_LINES;
use super::{Board, Mark, Position, Square};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// Something that picks the computer's reply.
pub trait Opponent {
    /// Chooses a square for `me`; `None` only when the board is full.
    fn select_move(&mut self, board: &Board, me: Mark) -> Option<Position>;
}

/// The fixed-priority heuristic with randomized corner and fallback picks.
#[derive(Debug, Clone)]
pub struct HeuristicOpponent<R = StdRng> {
    rng: R,
}

impl HeuristicOpponent<StdRng> {
    /// Creates an opponent seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates an opponent with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> HeuristicOpponent<R> {
    /// Creates an opponent drawing tie-breaks from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for HeuristicOpponent<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Opponent for HeuristicOpponent<R> {
    fn select_move(&mut self, board: &Board, me: Mark) -> Option<Position> {
        select_move(board, me, &mut self.rng)
    }
}

/// Picks a move for `me` using the fixed priority policy.
#[instrument(skip(board, rng), fields(me = %me))]
pub fn select_move<R: Rng + ?Sized>(board: &Board, me: Mark, rng: &mut R) -> Option<Position> {
    if let Some(pos) = completing_square(board, me) {
        debug!(position = %pos, "Taking the win");
        return Some(pos);
    }

    if let Some(pos) = completing_square(board, me.opponent()) {
        debug!(position = %pos, "Blocking the player");
        return Some(pos);
    }

    if board.is_empty(Position::Center) {
        return Some(Position::Center);
    }

    let corners: Vec<Position> = Position::CORNERS
        .into_iter()
        .filter(|pos| board.is_empty(*pos))
        .collect();
    if let Some(&pos) = corners.choose(rng) {
        debug!(position = %pos, "Taking a corner");
        return Some(pos);
    }

    board.empty_positions().choose(rng).copied()
}

/// First empty square (in line-table order) that would give `mark` three
/// in a row.
pub fn completing_square(board: &Board, mark: Mark) -> Option<Position> {
    WINNING_LINES.iter().find_map(|line| {
        let squares = line.squares(board);
        let owned = squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count();
        let empty = squares.iter().position(|s| *s == Square::Empty);
        match (owned, empty) {
            (2, Some(i)) => Some(line.positions()[i]),
            _ => None,
        }
    })
}

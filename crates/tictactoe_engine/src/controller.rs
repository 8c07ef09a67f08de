//! Match controller: the state machine that drives rounds and the score.
//!
//! ```text
//! Active ──player/computer move──▶ PlayerWon | ComputerWon | Drawn
//!   ▲                                          │
//!   └──────── start_new_round / reset_all ─────┘
//! ```
//!
//! The controller is synchronous. Timing (the computer's think delay) and
//! notification delivery belong to whoever drives it.

use super::opponent::{HeuristicOpponent, Opponent};
use super::promo::PromoCode;
use super::rules::{Outcome, apply_move, evaluate};
use super::state::{MatchState, OutcomeEvent, RoundStatus, Scoreboard};
use super::{Board, Mark, Position};
use tracing::{debug, info, instrument, warn};

/// Mark used by the human player.
pub const PLAYER: Mark = Mark::X;

/// Mark used by the computer.
pub const COMPUTER: Mark = Mark::O;

/// What a command did to the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnResult {
    /// Command did not apply; state unchanged.
    Ignored,
    /// Move applied; the computer replies next.
    ComputerToMove,
    /// Move applied; the player moves next.
    PlayerToMove,
    /// Move applied and the round ended.
    RoundOver {
        /// Terminal status reached.
        status: RoundStatus,
        /// Event for the notifier. `None` for draws.
        event: Option<OutcomeEvent>,
    },
}

/// Owns the authoritative [`MatchState`] for one match.
#[derive(Debug, Clone)]
pub struct MatchController<O = HeuristicOpponent> {
    state: MatchState,
    opponent: O,
}

impl MatchController<HeuristicOpponent> {
    /// Creates a controller playing against the heuristic opponent.
    #[instrument]
    pub fn new() -> Self {
        Self::with_opponent(HeuristicOpponent::new())
    }
}

impl Default for MatchController<HeuristicOpponent> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Opponent> MatchController<O> {
    /// Creates a controller with a custom opponent.
    pub fn with_opponent(opponent: O) -> Self {
        info!("Starting new match");
        Self {
            state: MatchState::default(),
            opponent,
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Places the player's mark at `index` (0-8).
    ///
    /// Ignored when the round is over, a computer move is pending, the index
    /// is out of range, or the square is taken.
    #[instrument(skip(self), fields(status = %self.state.status))]
    pub fn player_move(&mut self, index: usize) -> TurnResult {
        if self.state.status != RoundStatus::Active
            || self.state.computer_thinking
            || self.state.to_move != PLAYER
        {
            debug!("Player move ignored: not the player's turn");
            return TurnResult::Ignored;
        }
        let Some(pos) = Position::from_index(index) else {
            debug!("Player move ignored: index out of range");
            return TurnResult::Ignored;
        };
        let Some(board) = apply_move(&self.state.board, pos, PLAYER) else {
            return TurnResult::Ignored;
        };

        debug!(position = %pos, "Player moved");
        self.settle(board, PLAYER)
    }

    /// Plays the pending computer reply.
    ///
    /// Ignored unless the player has just moved and the round is active.
    #[instrument(skip(self), fields(status = %self.state.status))]
    pub fn computer_move(&mut self) -> TurnResult {
        if self.state.status != RoundStatus::Active || !self.state.computer_thinking {
            debug!("Computer move ignored: none pending");
            return TurnResult::Ignored;
        }
        let board = self.state.board;
        let placed = self
            .opponent
            .select_move(&board, COMPUTER)
            .and_then(|pos| apply_move(&board, pos, COMPUTER).map(|b| (pos, b)));
        let Some((pos, board)) = placed else {
            // Only reachable with a misbehaving custom opponent.
            warn!("Opponent produced no legal move");
            return TurnResult::Ignored;
        };

        debug!(position = %pos, "Computer moved");
        self.settle(board, COMPUTER)
    }

    /// Clears the board for a new round, keeping the score.
    ///
    /// Any pending computer move is dropped.
    #[instrument(skip(self))]
    pub fn start_new_round(&mut self) {
        info!(score = ?self.state.score, "Starting new round");
        self.state = MatchState::new_round(self.state.score);
    }

    /// Clears the board and zeroes the score.
    #[instrument(skip(self))]
    pub fn reset_all(&mut self) {
        info!("Resetting match");
        self.state = MatchState::new_round(Scoreboard::default());
    }

    /// Evaluates `board` after `mover` played and installs the next snapshot.
    fn settle(&mut self, board: Board, mover: Mark) -> TurnResult {
        let mut score = self.state.score;
        let (next, result) = match evaluate(&board) {
            Outcome::Win { mark, line } => {
                let (status, promo_code, event) = if mark == PLAYER {
                    score.player_wins += 1;
                    let code = PromoCode::generate(&mut rand::rng());
                    let event = OutcomeEvent::Win {
                        promo_code: code.clone(),
                    };
                    (RoundStatus::PlayerWon, Some(code), event)
                } else {
                    score.computer_wins += 1;
                    (RoundStatus::ComputerWon, None, OutcomeEvent::Loss)
                };
                info!(%status, line = ?line.indices(), "Round won");
                let next = MatchState {
                    board,
                    to_move: mover,
                    status,
                    winning_line: Some(line),
                    score,
                    promo_code,
                    computer_thinking: false,
                };
                let result = TurnResult::RoundOver {
                    status,
                    event: Some(event),
                };
                (next, result)
            }
            Outcome::Draw => {
                score.draws += 1;
                info!("Round drawn");
                let next = MatchState {
                    board,
                    to_move: mover,
                    status: RoundStatus::Drawn,
                    winning_line: None,
                    score,
                    promo_code: None,
                    computer_thinking: false,
                };
                let result = TurnResult::RoundOver {
                    status: RoundStatus::Drawn,
                    event: None,
                };
                (next, result)
            }
            Outcome::Undecided => {
                let next_turn = mover.opponent();
                let next = MatchState {
                    board,
                    to_move: next_turn,
                    status: RoundStatus::Active,
                    winning_line: None,
                    score,
                    promo_code: None,
                    computer_thinking: next_turn == COMPUTER,
                };
                let result = if next_turn == COMPUTER {
                    TurnResult::ComputerToMove
                } else {
                    TurnResult::PlayerToMove
                };
                (next, result)
            }
        };
        self.state = next;
        result
    }
}

//! Match state: the board of the current round plus the running score.

use super::promo::PromoCode;
use super::rules::Line;
use super::{Board, Mark};
use serde::{Deserialize, Serialize};

/// Status of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RoundStatus {
    /// Moves are still being made.
    Active,
    /// The player completed a line.
    PlayerWon,
    /// The computer completed a line.
    ComputerWon,
    /// Board filled with no line.
    Drawn,
}

impl RoundStatus {
    /// True for every status except [`RoundStatus::Active`].
    pub fn is_terminal(self) -> bool {
        self != RoundStatus::Active
    }
}

/// Cumulative results across rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Rounds won by the player.
    pub player_wins: u32,
    /// Rounds won by the computer.
    pub computer_wins: u32,
    /// Drawn rounds.
    pub draws: u32,
}

impl Scoreboard {
    /// Total finished rounds.
    pub fn rounds(&self) -> u32 {
        self.player_wins + self.computer_wins + self.draws
    }
}

/// Outcome worth telling the outside world about.
///
/// Draws are not reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutcomeEvent {
    /// The player won and was issued a promo code.
    Win {
        /// Code shown to the player.
        #[serde(rename = "promoCode")]
        promo_code: PromoCode,
    },
    /// The computer won.
    Loss,
}

impl OutcomeEvent {
    /// Wire name of the outcome (`"win"` or `"loss"`).
    pub fn kind(&self) -> &'static str {
        match self {
            OutcomeEvent::Win { .. } => "win",
            OutcomeEvent::Loss => "loss",
        }
    }

    /// Promo code carried by a win.
    pub fn promo_code(&self) -> Option<&PromoCode> {
        match self {
            OutcomeEvent::Win { promo_code } => Some(promo_code),
            OutcomeEvent::Loss => None,
        }
    }
}

/// Snapshot of a match.
///
/// The controller never mutates a snapshot in place; every transition
/// produces a new value, so observers can diff consecutive snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) board: Board,
    pub(crate) to_move: Mark,
    pub(crate) status: RoundStatus,
    pub(crate) winning_line: Option<Line>,
    pub(crate) score: Scoreboard,
    pub(crate) promo_code: Option<PromoCode>,
    pub(crate) computer_thinking: bool,
}

impl MatchState {
    /// Fresh round with the given score carried over.
    pub fn new_round(score: Scoreboard) -> Self {
        Self {
            board: Board::new(),
            to_move: Mark::X,
            status: RoundStatus::Active,
            winning_line: None,
            score,
            promo_code: None,
            computer_thinking: false,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark that moves next. Only meaningful while the round is active.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the round status.
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Line that ended the round, if it was won.
    pub fn winning_line(&self) -> Option<Line> {
        self.winning_line
    }

    /// Returns the running score.
    pub fn score(&self) -> Scoreboard {
        self.score
    }

    /// Promo code for the current win, if any.
    pub fn promo_code(&self) -> Option<&PromoCode> {
        self.promo_code.as_ref()
    }

    /// True while a computer reply is pending.
    pub fn computer_thinking(&self) -> bool {
        self.computer_thinking
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new_round(Scoreboard::default())
    }
}

//! Presentation themes. Both drive the same session; only the look differs.

use derive_more::Display;
use rand::Rng;
use rand::seq::IndexedRandom;
use ratatui::style::Color;

/// Lines shown after a loss in the decorated theme.
pub const LOSS_LINES: [&str; 5] = [
    "Nice try! The computer won this round.",
    "So close. Want to give it another go?",
    "The computer saw that one coming.",
    "Every loss is practice for the next win.",
    "Rematch? The board is waiting.",
];

/// Advice listed under the board in the decorated theme.
pub const TIPS: [&str; 3] = [
    "Try to control the center square",
    "Look for opportunities to create two-way wins",
    "Block the computer when it has two in a row",
];

/// Visual style of the terminal front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, clap::ValueEnum)]
pub enum Theme {
    /// Plain board and status line.
    #[default]
    #[display("classic")]
    Classic,
    /// Colored banners, loss flavor text and tips.
    #[display("decorated")]
    Decorated,
}

impl Theme {
    /// Window title.
    pub fn title(self) -> &'static str {
        match self {
            Theme::Classic => "Tic-Tac-Toe",
            Theme::Decorated => "✦ Tic-Tac-Toe Promo ✦",
        }
    }

    /// Accent used for titles and banners.
    pub fn accent(self) -> Color {
        match self {
            Theme::Classic => Color::Cyan,
            Theme::Decorated => Color::Magenta,
        }
    }

    /// Picks a flavor line for a loss. Only the decorated theme has them.
    pub fn loss_line<R: Rng + ?Sized>(self, rng: &mut R) -> Option<&'static str> {
        match self {
            Theme::Classic => None,
            Theme::Decorated => LOSS_LINES.choose(rng).copied(),
        }
    }

    /// Tips listed beneath the board.
    pub fn tips(self) -> &'static [&'static str] {
        match self {
            Theme::Classic => &[],
            Theme::Decorated => &TIPS,
        }
    }
}

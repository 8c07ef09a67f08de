//! Application state and logic.

use super::input::{Action, action_for};
use super::theme::Theme;
use crate::session::{NotificationStatus, SessionCommand, SessionSnapshot};
use crossterm::event::KeyCode;
use rand::Rng;
use tictactoe_engine::{Position, RoundStatus};
use tracing::debug;

/// Front-end state that lives outside the match: cursor, theme, flavor text.
#[derive(Debug)]
pub struct App {
    theme: Theme,
    cursor: Position,
    flavor: Option<&'static str>,
    last_status: RoundStatus,
    should_quit: bool,
}

impl App {
    /// Creates a new application.
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            cursor: Position::Center,
            flavor: None,
            last_status: RoundStatus::Active,
            should_quit: false,
        }
    }

    /// Active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Square under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Flavor line picked for the current loss, if any.
    pub fn flavor(&self) -> Option<&'static str> {
        self.flavor
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles a key press, returning the command to send, if any.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<SessionCommand> {
        match action_for(key, self.cursor)? {
            Action::Command(command) => Some(command),
            Action::Cursor(position) => {
                self.cursor = position;
                None
            }
            Action::PlaceAtCursor => Some(SessionCommand::PlayerMove(self.cursor.to_index())),
            Action::Quit => {
                debug!("User quit");
                self.should_quit = true;
                None
            }
        }
    }

    /// Tracks round transitions so a loss picks one flavor line, not one per frame.
    pub fn observe<R: Rng + ?Sized>(&mut self, snapshot: &SessionSnapshot, rng: &mut R) {
        let status = snapshot.state.status();
        if status == self.last_status {
            return;
        }
        self.flavor = match status {
            RoundStatus::ComputerWon => self.theme.loss_line(rng),
            _ => None,
        };
        self.last_status = status;
    }

    /// Headline for the current snapshot.
    pub fn status_line(&self, snapshot: &SessionSnapshot) -> String {
        let state = &snapshot.state;
        match state.status() {
            RoundStatus::Active if state.computer_thinking() => {
                "Computer is thinking...".to_string()
            }
            RoundStatus::Active => format!("Your turn ({})", state.to_move()),
            RoundStatus::PlayerWon => match state.promo_code() {
                Some(code) => format!("Congratulations! Your promo code: {}", code),
                None => "Congratulations!".to_string(),
            },
            RoundStatus::ComputerWon => self
                .flavor
                .unwrap_or("The computer won this round.")
                .to_string(),
            RoundStatus::Drawn => "It's a draw!".to_string(),
        }
    }

    /// Scoreboard summary.
    pub fn score_line(snapshot: &SessionSnapshot) -> String {
        let score = snapshot.state.score();
        format!(
            "You {}  ·  Computer {}  ·  Draws {}",
            score.player_wins, score.computer_wins, score.draws
        )
    }

    /// Notification indicator, when there is something to show.
    pub fn notification_line(snapshot: &SessionSnapshot) -> Option<&'static str> {
        match snapshot.notification {
            NotificationStatus::Idle => None,
            NotificationStatus::Sending => Some("Sending..."),
            NotificationStatus::Delivered => Some("Result recorded"),
            NotificationStatus::Failed => Some("Could not record result"),
        }
    }
}

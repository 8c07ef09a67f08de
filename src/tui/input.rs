//! Keyboard mapping.

use crate::session::SessionCommand;
use crossterm::event::KeyCode;
use tictactoe_engine::Position;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Forward a command to the session.
    Command(SessionCommand),
    /// Move the cursor.
    Cursor(Position),
    /// Place a mark under the cursor.
    PlaceAtCursor,
    /// Leave the game.
    Quit,
}

/// Maps a key to an action given the current cursor.
pub fn action_for(key: KeyCode, cursor: Position) -> Option<Action> {
    match key {
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10)? as usize - 1;
            Some(Action::Command(SessionCommand::PlayerMove(index)))
        }
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Action::Command(SessionCommand::NewRound)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Command(SessionCommand::ResetAll)),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::PlaceAtCursor),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(Action::Cursor(move_cursor(cursor, key)))
        }
        _ => None,
    }
}

/// Moves cursor based on arrow keys.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let index = cursor.to_index();
    let (row, col) = (index / 3, index % 3);
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictactoe_engine::{Mark, MatchState, Position, RoundStatus, Square};

use super::app::App;
use crate::session::SessionSnapshot;

const KEY_HELP: &str = "1-9 / arrows+Enter: move   n: new round   r: reset   q: quit";

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App, snapshot: &SessionSnapshot) {
    let area = frame.area();
    let theme = app.theme();
    let tips = theme.tips();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                       // Title
            Constraint::Length(1),                       // Score
            Constraint::Min(11),                         // Board
            Constraint::Length(4),                       // Status
            Constraint::Length(tips.len() as u16 + 1),   // Tips
            Constraint::Length(1),                       // Help
        ])
        .split(area);

    let title = Paragraph::new(theme.title())
        .style(Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let score = Paragraph::new(App::score_line(snapshot))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(score, chunks[1]);

    draw_board(frame, chunks[2], &snapshot.state, app.cursor());
    draw_status(frame, chunks[3], app, snapshot);

    if !tips.is_empty() {
        let mut lines = vec![Line::from(Span::styled(
            "Tips for winning:",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        lines.extend(tips.iter().map(|tip| Line::from(format!("• {}", tip))));
        let tips = Paragraph::new(lines)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(tips, chunks[4]);
    }

    let help = Paragraph::new(KEY_HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[5]);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App, snapshot: &SessionSnapshot) {
    let color = match snapshot.state.status() {
        RoundStatus::Active => Color::Yellow,
        RoundStatus::PlayerWon => Color::Green,
        RoundStatus::ComputerWon => Color::Red,
        RoundStatus::Drawn => Color::Blue,
    };

    let mut lines = vec![Line::from(Span::styled(
        app.status_line(snapshot),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    if let Some(note) = App::notification_line(snapshot) {
        lines.push(Line::from(Span::styled(
            note,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let status = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn draw_board(frame: &mut Frame, area: Rect, state: &MatchState, cursor: Position) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, chunk) in [rows[0], rows[2], rows[4]].into_iter().enumerate() {
        let positions = [row * 3, row * 3 + 1, row * 3 + 2].map(|i| Position::ALL[i]);
        draw_row(frame, chunk, state, cursor, positions);
    }
    draw_separator(frame, rows[1]);
    draw_separator(frame, rows[3]);
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    state: &MatchState,
    cursor: Position,
    positions: [Position; 3],
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    draw_cell(frame, cols[0], state, cursor, positions[0]);
    draw_separator_vertical(frame, cols[1]);
    draw_cell(frame, cols[2], state, cursor, positions[1]);
    draw_separator_vertical(frame, cols[3]);
    draw_cell(frame, cols[4], state, cursor, positions[2]);
}

fn draw_cell(frame: &mut Frame, area: Rect, state: &MatchState, cursor: Position, pos: Position) {
    let hint = format!(" {} ", pos.to_index() + 1);
    let (symbol, base_style) = match state.board().get(pos) {
        Square::Empty => (hint, Style::default().fg(Color::DarkGray)),
        Square::Occupied(Mark::X) => (
            " X ".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Mark::O) => (
            " O ".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let on_line = state.winning_line().is_some_and(|line| line.contains(pos));
    let style = if on_line {
        base_style.bg(Color::Green).fg(Color::Black)
    } else if pos == cursor && state.status() == RoundStatus::Active {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(symbol, style)))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("────────────┼────────────┼────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│\n│\n│")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

//! Terminal front end for a match session.

#![warn(missing_docs)]

mod app;
mod input;
mod theme;
mod ui;

pub use app::App;
pub use input::{Action, action_for, move_cursor};
pub use theme::{LOSS_LINES, TIPS, Theme};

use crate::session::SessionHandle;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Log file used while the terminal is in raw mode.
pub const LOG_FILE: &str = "tictactoe_promo.log";

/// How long to wait for a key before redrawing.
const FRAME: Duration = Duration::from_millis(50);

/// Runs the TUI until the user quits.
pub async fn run_tui(session: SessionHandle, theme: Theme) -> Result<()> {
    info!(%theme, "Starting tic-tac-toe TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, session, App::new(theme)).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Draws the latest snapshot and forwards key presses to the session.
#[instrument(skip_all)]
async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: SessionHandle,
    mut app: App,
) -> Result<()> {
    let mut rng = StdRng::from_os_rng();

    loop {
        let snapshot = session.snapshot();
        app.observe(&snapshot, &mut rng);
        terminal.draw(|f| ui::draw(f, &app, &snapshot))?;

        if event::poll(FRAME)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                debug!(?key.code, "Key pressed");
                if let Some(command) = app.handle_key(key.code) {
                    if !session.send(command) {
                        warn!("Session stopped");
                        return Ok(());
                    }
                }
            }
        }

        if app.should_quit() {
            info!("User quit");
            return Ok(());
        }

        tokio::task::yield_now().await;
    }
}

//! Terminal dashboard: drawing loop, input handling, and the background
//! poll worker feeding it.

pub mod app;
pub mod format;
pub mod render;
pub mod worker;

use crate::ui::app::App;
use crate::ui::worker::{Command, Event};
use anyhow::Context;
use crossterm::{
    event::{self, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

/// How long one iteration waits for a key before redrawing.
const INPUT_POLL: Duration = Duration::from_millis(90);

/// Puts the terminal into raw mode + alternate screen and restores it on
/// drop, so a panic or early return never leaves the shell unusable.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen).context("failed to enter alternate screen")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Runs the dashboard until the operator quits.
///
/// All network traffic happens in the worker; this loop only folds worker
/// events into [`App`], draws, and forwards keypresses.
pub async fn run(
    command_tx: mpsc::Sender<Command>,
    mut events: mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal: Terminal<CrosstermBackend<Stdout>> =
        Terminal::new(backend).context("failed to initialize terminal")?;

    let mut app = App::new();
    while !app.should_quit {
        while let Ok(event) = events.try_recv() {
            app.apply_event(event);
        }

        terminal
            .draw(|frame| render::draw(frame, &app))
            .context("failed to draw frame")?;

        if event::poll(INPUT_POLL).context("failed polling terminal input")? {
            if let TermEvent::Key(key) = event::read().context("failed reading terminal input")? {
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = app.on_key(key.code) {
                        // Worker gone means we are shutting down anyway.
                        let _ = command_tx.send(command).await;
                    }
                }
            }
        }
    }
    Ok(())
}

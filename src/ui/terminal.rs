use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use rand::Rng;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::app::App;

/// How long to wait for input before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Spin up the terminal backend, enter the draw loop, and keep processing input
/// until the user quits. Raw mode is switched off again on every exit path
/// once it has been enabled.
pub fn run_app<R: Rng>(app: &mut App<R>) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut terminal = setup_or_rollback(enter_terminal, || {
        // Setup already failed; a second error here would only hide it.
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })?;

    let result = event_loop(&mut terminal, app);

    cleanup_terminal(&mut terminal)?;
    result
}

/// Run `setup`, calling `rollback` only if it fails.
fn setup_or_rollback<T>(
    setup: impl FnOnce() -> Result<T>,
    rollback: impl FnOnce(),
) -> Result<T> {
    let outcome = setup();
    if outcome.is_err() {
        rollback();
    }
    outcome
}

fn enter_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("failed to create terminal backend")
}

fn event_loop<R: Rng>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<R>,
) -> Result<()> {
    loop {
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;

        if !event::poll(POLL_INTERVAL).context("event polling failed")? {
            continue;
        }

        if let Event::Key(key_event) = event::read().context("failed to read event")? {
            if key_event.kind != KeyEventKind::Press {
                continue;
            }

            // Raw mode swallows SIGINT, so honor Ctrl+C by hand.
            if key_event.modifiers.contains(KeyModifiers::CONTROL)
                && key_event.code == KeyCode::Char('c')
            {
                return Ok(());
            }

            if app.handle_key(key_event.code)? {
                return Ok(());
            }
        }
    }
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal
        .show_cursor()
        .context("failed to restore cursor visibility")
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use anyhow::anyhow;

    use super::*;

    #[test]
    fn failed_setup_rolls_back() {
        let rolled_back = Cell::new(false);
        let result: Result<()> =
            setup_or_rollback(|| Err(anyhow!("no tty")), || rolled_back.set(true));
        assert!(result.is_err());
        assert!(rolled_back.get());
    }

    #[test]
    fn successful_setup_keeps_state() {
        let rolled_back = Cell::new(false);
        let value = setup_or_rollback(|| Ok(7), || rolled_back.set(true)).expect("setup ok");
        assert_eq!(value, 7);
        assert!(!rolled_back.get());
    }
}

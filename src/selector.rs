//! Full-screen driver around the selector state machine.

use std::io::{self, IsTerminal, Stdout};
use std::sync::Once;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::app::{keymap::map_key, App, Outcome, SelectorDefaults, SelectorEvent};
use crate::error::SelectError;
use crate::hosts::Catalog;
use crate::ui;

/// Raw mode plus alternate screen, restored on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn start() -> io::Result<Self> {
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "stdin/stdout is not a terminal",
            ));
        }

        install_panic_hook();
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = restore_terminal();
                Err(e)
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal() {
            tracing::error!("Failed to restore terminal: {}", e);
        }
        let _ = self.terminal.show_cursor();
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Restores the terminal before the default panic output is printed.
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            previous(info);
        }));
    });
}

/// Runs the interactive selector until the user confirms or cancels.
pub fn run(catalog: Catalog, defaults: SelectorDefaults) -> Result<Outcome, SelectError> {
    if catalog.is_empty() {
        return Err(SelectError::EmptyCatalog);
    }

    let mut session = TerminalSession::start().map_err(SelectError::TerminalUnavailable)?;
    tracing::debug!("Selector started with {} hosts", catalog.len());

    let app = App::new(catalog, defaults);
    let outcome = run_app(&mut session.terminal, app)?;
    drop(session);

    Ok(outcome)
}

/// [`run`] from inside the multi-threaded runtime. The worker hands its
/// other tasks off while the selector blocks on terminal input.
pub fn run_blocking(catalog: Catalog, defaults: SelectorDefaults) -> Result<Outcome, SelectError> {
    tokio::task::block_in_place(|| run(catalog, defaults))
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> io::Result<Outcome> {
    let size = terminal.size()?;
    app = app.update(SelectorEvent::Resize {
        width: size.width,
        height: size.height,
    });

    loop {
        terminal.draw(|f| ui::draw::<B>(f, &mut app))?;

        let selector_event = match event::read()? {
            Event::Key(key) => map_key(&app, key),
            Event::Resize(width, height) => Some(SelectorEvent::Resize { width, height }),
            _ => None,
        };
        if let Some(selector_event) = selector_event {
            app = app.update(selector_event);
        }

        if let Some(outcome) = app.outcome() {
            return Ok(outcome);
        }
    }
}

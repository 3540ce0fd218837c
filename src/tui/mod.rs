//! Live terminal UI for the room monitor.
//!
//! Feature-gated behind `tui`. Launch with `--tui` on the CLI.

mod controls;
mod layout;
/// Application state and key-bound actions.
pub mod runtime;
mod style;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Instant;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::runner::Monitor;
use runtime::App;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Raw-mode alternate screen, restored when dropped.
struct Screen {
    terminal: Term,
}

impl Screen {
    fn open() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(e)
            }
        }
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Runs the monitor interactively until the user quits.
///
/// Terminal errors are reported on stderr after the screen is restored and
/// end the process with status 1.
pub fn run(monitor: Monitor, preset: &str, import_path: Option<PathBuf>) {
    let mut app = App::new(monitor, preset, import_path);
    let outcome =
        Screen::open().and_then(|mut screen| monitor_loop(&mut screen.terminal, &mut app));
    if let Err(e) = outcome {
        eprintln!("error: terminal UI failed: {e}");
        std::process::exit(1);
    }
}

/// Draws, waits for a key until the next update is due, then updates rooms.
fn monitor_loop(terminal: &mut Term, app: &mut App) -> io::Result<()> {
    while !app.quit {
        terminal.draw(|frame| layout::render(frame, app))?;

        if event::poll(app.until_next_update(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                controls::handle_key(app, key);
            }
        }

        if app.update_due(Instant::now()) {
            app.tick();
            app.last_tick = Instant::now();
        }
    }
    Ok(())
}

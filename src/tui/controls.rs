//! Keyboard bindings: each key maps to one monitor action.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::{App, THRESHOLD_STEP_W};
use crate::model::Phase;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Char(' ') => app.toggle_pause(),
        KeyCode::Char('u') => app.manual_update(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Char('1') => app.select_phase(Phase::L1),
        KeyCode::Char('2') => app.select_phase(Phase::L2),
        KeyCode::Char('3') => app.select_phase(Phase::L3),
        KeyCode::Char('+' | '=') | KeyCode::Right => app.adjust_sockets(1),
        KeyCode::Char('-') | KeyCode::Left => app.adjust_sockets(-1),
        KeyCode::Char(']') => app.adjust_threshold(THRESHOLD_STEP_W),
        KeyCode::Char('[') => app.adjust_threshold(-THRESHOLD_STEP_W),
        KeyCode::Char('i') => app.import(),
        _ => {}
    }
}

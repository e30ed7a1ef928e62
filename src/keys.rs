use crate::app::{App, MenuItem};
use crossterm::event::KeyCode::{self, Char};
use crossterm::event::{KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Letters are names on the entry form, so everything else lives on
/// control chords and function keys.
pub async fn handle_key_bindings(key_event: KeyEvent, app: &Arc<Mutex<App>>) {
    if key_event.kind == KeyEventKind::Release {
        return;
    }

    let mut guard = app.lock().await;
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match (guard.state.active_tab, key_event.code, ctrl) {
        // Quit
        (_, Char('c') | Char('q'), true) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Global
        (_, KeyCode::F(1), _) => guard.toggle_help(),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),
        (_, KeyCode::F(11), _) => guard.toggle_full_screen(),
        (_, KeyCode::F(12), _) => guard.toggle_show_logs(),
        (_, KeyCode::PageUp, _) => guard.view_prev_innings(),
        (_, KeyCode::PageDown, _) => guard.view_next_innings(),

        // Scoring actions
        (MenuItem::Scoring, KeyCode::Enter, _) => guard.add_ball(),
        (MenuItem::Scoring, KeyCode::F(5), _) | (MenuItem::Scoring, Char('o'), true) => {
            guard.over_bowled()
        }
        (MenuItem::Scoring, Char('s'), true) => guard.swap_strike(),
        (MenuItem::Scoring, Char('n'), true) => guard.close_innings(),

        // Entry form
        (MenuItem::Scoring, KeyCode::Tab | KeyCode::Down, _) => guard.state.entry.focus_next(),
        (MenuItem::Scoring, KeyCode::BackTab | KeyCode::Up, _) => guard.state.entry.focus_prev(),
        (MenuItem::Scoring, KeyCode::Right, _) => guard.state.entry.cycle(true),
        (MenuItem::Scoring, KeyCode::Left, _) => guard.state.entry.cycle(false),
        (MenuItem::Scoring, KeyCode::Backspace, _) => guard.state.entry.backspace(),
        (MenuItem::Scoring, Char(c), false) => guard.state.entry.input_char(c),

        _ => {}
    }
}

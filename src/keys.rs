use crate::app::{App, MenuItem};
use crate::state::app_state::InputMode;
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    if (key_event.code, key_event.modifiers) == (Char('c'), KeyModifiers::CONTROL) {
        crate::cleanup_terminal();
        std::process::exit(0);
    }

    // Text entry swallows everything except its own editing keys.
    if guard.state.is_typing() {
        match key_event.code {
            KeyCode::Esc => guard.cancel_input(),
            KeyCode::Enter => guard.submit_input(),
            KeyCode::Backspace => guard.input_backspace(),
            KeyCode::Tab if guard.state.squares.input_mode == InputMode::Setup => {
                guard.input_next_field()
            }
            Char(c) => guard.input_char(c),
            _ => {}
        }
        return;
    }

    if guard.state.share.is_some() && key_event.code == KeyCode::Esc {
        guard.dismiss_share();
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Matchup),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Timeline),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Squares),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Team pickers
        (MenuItem::Matchup, KeyCode::Tab | Char('h') | Char('l') | KeyCode::Left | KeyCode::Right, _) => {
            guard.picker_toggle_focus()
        }
        (MenuItem::Matchup, Char('j') | KeyCode::Down, _) => guard.picker_down(),
        (MenuItem::Matchup, Char('k') | KeyCode::Up, _) => guard.picker_up(),
        (MenuItem::Matchup, KeyCode::Enter, _) => guard.picker_select(),
        (MenuItem::Matchup, Char('s'), _) => guard.swap_teams(),
        (MenuItem::Matchup, Char('y'), _) => {
            guard.share_matchup();
        }
        (MenuItem::Matchup, Char('J') | KeyCode::PageDown, _) => guard.matchup_scroll_down(),
        (MenuItem::Matchup, Char('K') | KeyCode::PageUp, _) => guard.matchup_scroll_up(),

        // Timeline
        (MenuItem::Timeline, Char('j') | KeyCode::Down, _) => guard.timeline_scroll_down(),
        (MenuItem::Timeline, Char('k') | KeyCode::Up, _) => guard.timeline_scroll_up(),

        // Squares
        (MenuItem::Squares, Char('n'), _) => guard.open_setup(),
        (MenuItem::Squares, Char('h') | KeyCode::Left, _) => guard.state.squares.move_cursor(0, -1),
        (MenuItem::Squares, Char('l') | KeyCode::Right, _) => guard.state.squares.move_cursor(0, 1),
        (MenuItem::Squares, Char('j') | KeyCode::Down, _) => guard.state.squares.move_cursor(1, 0),
        (MenuItem::Squares, Char('k') | KeyCode::Up, _) => guard.state.squares.move_cursor(-1, 0),
        (MenuItem::Squares, Char('e') | KeyCode::Enter, _) => guard.begin_edit_cell(),
        (MenuItem::Squares, Char('b'), _) => guard.begin_bulk_assign(),
        (MenuItem::Squares, Char('p'), _) => guard.toggle_polling(),
        (MenuItem::Squares, Char('r'), _) => {
            if let Some(request) = guard.score_refresh_request() {
                drop(guard);
                let _ = network_requests.send(request).await;
                return;
            }
        }
        (MenuItem::Squares, Char('X'), _) => guard.reset_squares(),

        // Global
        (_, Char('R'), _) => {
            let request = guard.load_dataset_request();
            drop(guard);
            let _ = network_requests.send(request).await;
        }
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}

use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::board;
use crate::tui::app::{App, Mode, View};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    app.status_message = None;

    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,

        // Tabs
        (_, KeyCode::Char(c @ '1'..='4')) => {
            let idx = c as usize - '1' as usize;
            app.set_view(View::ALL[idx]);
        }
        (_, KeyCode::Tab) => app.set_view(app.view.next()),
        (_, KeyCode::BackTab) => app.set_view(app.view.prev()),

        // Search
        (_, KeyCode::Char('/')) => app.mode = Mode::Search,
        (_, KeyCode::Esc) => {
            app.search.clear();
            app.workspace.query.clear();
            app.clamp_cursor();
        }

        // Session
        (_, KeyCode::Char('L')) => app.sign_out(),

        // Task creation is reachable from every tab, like the header button
        (_, KeyCode::Char('n' | 'a')) => app.open_new_form(),

        _ => match app.view {
            View::Board => handle_board_key(app, key),
            View::Advisor => handle_advisor_key(app, key),
            View::Dashboard | View::Analytics => {}
        },
    }
}

fn handle_board_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => {
            app.column = app.column.saturating_sub(1);
            app.clamp_cursor();
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.column = (app.column + 1).min(board::COLUMN_COUNT - 1);
            app.clamp_cursor();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.row = app.row.saturating_sub(1);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.row += 1;
            app.clamp_cursor();
        }
        KeyCode::Char('g') | KeyCode::Home => app.row = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.row = usize::MAX;
            app.clamp_cursor();
        }
        KeyCode::Char(' ' | 'x') => app.toggle_selected(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_form(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        _ => {}
    }
}

fn handle_advisor_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('r') && !app.advisor.is_loading() {
        app.refresh_advice();
    }
}

use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// Live filter: every edit updates the board's query
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        // Cancel search: drop the filter
        KeyCode::Esc => {
            app.search.clear();
            app.workspace.query.clear();
            app.mode = Mode::Navigate;
        }
        // Keep the filter and go back to the board
        KeyCode::Enter => {
            app.mode = Mode::Navigate;
        }
        _ => {
            if app.search.handle_key(key) {
                app.workspace.query = app.search.text().to_string();
            }
        }
    }
    app.clamp_cursor();
}

#[cfg(test)]
mod tests {
    use crate::model::session::Role;
    use crate::tui::app::Mode;
    use crate::tui::app::tests::test_app;
    use crate::tui::input::tests::{press, type_str};
    use crossterm::event::KeyCode;

    #[test]
    fn typing_filters_live_and_escape_clears() {
        let (_dir, mut app) = test_app(Some(Role::Employee));
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Search);
        type_str(&mut app, "sales");
        assert_eq!(app.workspace.query, "sales");
        assert_eq!(app.visible_tasks().len(), 1);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.workspace.query.is_empty());
        assert_eq!(app.visible_tasks().len(), 3);
    }

    #[test]
    fn enter_keeps_filter() {
        let (_dir, mut app) = test_app(Some(Role::Employee));
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "budget");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.workspace.query, "budget");
        // Backspace edits the query
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.workspace.query, "budge");
    }
}

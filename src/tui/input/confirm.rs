use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('y' | 'Y')) => {
            app.resolve_delete(true);
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.resolve_delete(false);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::model::session::Role;
    use crate::tui::app::Mode;
    use crate::tui::app::tests::test_app;
    use crate::tui::input::tests::press;
    use crossterm::event::KeyCode;

    #[test]
    fn escape_cancels_and_y_deletes() {
        let (_dir, mut app) = test_app(Some(Role::TeamLead));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, Mode::Confirm);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.workspace.tasks.len(), 3);

        press(&mut app, KeyCode::Char('d'));
        // Unrelated keys leave the prompt up
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.mode, Mode::Confirm);
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.workspace.tasks.len(), 2);
    }
}

use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, LoginField};

pub(super) fn handle_login(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login.toggle_focus();
        }
        // Enter on the ID field moves on; on the password field it signs in
        KeyCode::Enter => match app.login.focus {
            LoginField::EmployeeId => app.login.focus = LoginField::Password,
            LoginField::Password => app.submit_login(),
        },
        _ => {
            if app.login.auth.is_pending() {
                return;
            }
            app.login.focused_mut().handle_key(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::model::session::Role;
    use crate::tui::app::Mode;
    use crate::tui::app::tests::test_app;
    use crate::tui::input::tests::{press, type_str};
    use crossterm::event::KeyCode;

    #[test]
    fn typing_fills_fields_and_enter_submits() {
        let (_dir, mut app) = test_app(None);
        type_str(&mut app, "EMP2001");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "emp@pass");
        assert_eq!(app.login.employee_id.text(), "EMP2001");
        assert_eq!(app.login.password.text(), "emp@pass");

        press(&mut app, KeyCode::Enter);
        assert!(app.login.auth.is_pending());
        let event = app.worker().wait(Duration::from_secs(5)).unwrap();
        app.handle_worker_event(event);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.role(), Some(Role::Employee));
        // Fields are cleared once signed in
        assert!(app.login.password.is_empty());
    }

    #[test]
    fn tab_switches_fields() {
        let (_dir, mut app) = test_app(None);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "secret");
        assert!(app.login.employee_id.is_empty());
        assert_eq!(app.login.password.text(), "secret");
    }

    #[test]
    fn escape_quits() {
        let (_dir, mut app) = test_app(None);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }
}

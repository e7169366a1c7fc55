use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, FormField};

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.close_form(),
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => app.submit_form(),
        (KeyModifiers::CONTROL, KeyCode::Char('b')) => app.request_breakdown(),
        (_, KeyCode::Tab | KeyCode::Down) => move_focus(app, true),
        (_, KeyCode::BackTab | KeyCode::Up) => move_focus(app, false),
        _ => edit_field(app, key),
    }
}

fn move_focus(app: &mut App, forward: bool) {
    if let Some(form) = app.form.as_mut() {
        form.focus = if forward {
            form.focus.next()
        } else {
            form.focus.prev()
        };
    }
}

fn edit_field(app: &mut App, key: KeyEvent) {
    let categories = app.workspace.config.board.categories.clone();
    let Some(form) = app.form.as_mut() else {
        return;
    };
    form.error = None;

    if form.focus.is_choice() {
        if matches!(
            key.code,
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') | KeyCode::Enter
        ) {
            match form.focus {
                FormField::Status => form.draft.cycle_status(),
                FormField::Priority => form.draft.cycle_priority(),
                FormField::Category => form.draft.cycle_category(&categories),
                _ => {}
            }
        }
        return;
    }

    match (form.focus, key.code) {
        // Enter on the checklist row adds the typed item
        (FormField::SubTasks, KeyCode::Enter) => {
            let item = form.new_subtask.text().trim().to_string();
            if !item.is_empty() {
                form.draft.sub_tasks.push(item);
                form.new_subtask.clear();
            }
        }
        // Backspace on an empty checklist input drops the last item
        (FormField::SubTasks, KeyCode::Backspace) if form.new_subtask.is_empty() => {
            form.draft.sub_tasks.pop();
        }
        (_, KeyCode::Enter) => form.focus = form.focus.next(),
        _ => {
            if let Some(field) = form.focused_text_mut() {
                field.handle_key(key);
            }
        }
    }
}

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use super::helpers::{centered_rect_fixed, input_spans, push_right_aligned};
use crate::tui::app::{App, FormField, FormState};

const POPUP_W: u16 = 72;
const POPUP_H: u16 = 24;
const LABEL_W: usize = 13;
/// Checklist rows shown before older items collapse into a count
const MAX_VISIBLE_SUBTASKS: usize = 6;

/// Create/edit task popup
pub fn render_form_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = app.form.as_ref() else {
        return;
    };
    let bg = app.theme.background;
    let theme = &app.theme;
    let popup = centered_rect_fixed(POPUP_W, POPUP_H, area);
    frame.render_widget(Clear, popup);

    let title = if form.draft.is_edit() {
        " Edit Task "
    } else {
        " Create New Task "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    let width = inner.width as usize;

    let mut lines = vec![Line::from("")];
    for field in FormField::ALL {
        if field == FormField::SubTasks {
            break;
        }
        let focused = form.focus == field;
        let mut spans = vec![label_span(app, field.label(), focused)];
        spans.extend(field_value(app, form, field, focused));
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));

    // Checklist header with the breakdown action on the right
    let focused = form.focus == FormField::SubTasks;
    let mut header = vec![label_span(app, FormField::SubTasks.label(), focused)];
    let (action, action_style) = if form.generating {
        (
            "AI Generating...",
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        )
    } else if form.breakdown_enabled() {
        (
            "\u{2726} Smart Breakdown",
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("\u{2726} Smart Breakdown", Style::default().fg(theme.dim).bg(bg))
    };
    push_right_aligned(
        &mut header,
        vec![Span::styled(action, action_style), Span::styled(" ", Style::default().bg(bg))],
        width,
        Style::default().bg(bg),
    );
    lines.push(Line::from(header));

    let items = &form.draft.sub_tasks;
    let hidden = items.len().saturating_sub(MAX_VISIBLE_SUBTASKS);
    if hidden > 0 {
        lines.push(Line::from(Span::styled(
            format!("   (+{} earlier)", hidden),
            Style::default().fg(theme.dim).bg(bg),
        )));
    }
    for (i, item) in items.iter().enumerate().skip(hidden) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("   {:>2}. ", i + 1),
                Style::default().fg(theme.dim).bg(bg),
            ),
            Span::styled(item.as_str(), Style::default().fg(theme.text).bg(bg)),
        ]));
    }
    let mut add_row = vec![Span::styled("    + ", Style::default().fg(theme.dim).bg(bg))];
    add_row.extend(input_spans(
        &form.new_subtask,
        focused,
        "add a step, Enter to keep",
        false,
        theme,
        bg,
    ));
    lines.push(Line::from(add_row));
    lines.push(Line::from(""));

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(theme.red).bg(bg),
        )));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);

    // Footer pinned to the last inner row
    if inner.height > 0 {
        let save = if form.draft.is_edit() {
            "Update Task"
        } else {
            "Create Task"
        };
        let footer = Line::from(vec![
            Span::styled(" Esc ", Style::default().fg(theme.text_bright).bg(bg)),
            Span::styled("Cancel  ", Style::default().fg(theme.dim).bg(bg)),
            Span::styled("Ctrl-S ", Style::default().fg(theme.text_bright).bg(bg)),
            Span::styled(format!("{}  ", save), Style::default().fg(theme.dim).bg(bg)),
            Span::styled("Ctrl-B ", Style::default().fg(theme.text_bright).bg(bg)),
            Span::styled("Smart Breakdown", Style::default().fg(theme.dim).bg(bg)),
        ]);
        let footer_area = Rect {
            y: inner.y + inner.height - 1,
            height: 1,
            ..inner
        };
        frame.render_widget(Paragraph::new(footer), footer_area);
    }
}

fn label_span<'a>(app: &App, label: &str, focused: bool) -> Span<'a> {
    let bg = app.theme.background;
    let marker = if focused { "\u{203A}" } else { " " };
    let style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };
    Span::styled(
        format!("{} {:<width$} ", marker, label, width = LABEL_W),
        style,
    )
}

fn field_value<'a>(app: &App, form: &'a FormState, field: FormField, focused: bool) -> Vec<Span<'a>> {
    let theme = &app.theme;
    let bg = theme.background;
    let (value, color) = match field {
        FormField::Title => {
            return input_spans(&form.title, focused, "What needs to be done?", false, theme, bg);
        }
        FormField::Description => {
            return input_spans(&form.description, focused, "Add more details...", false, theme, bg);
        }
        FormField::DueDate => {
            return input_spans(&form.due_date, focused, "YYYY-MM-DD", false, theme, bg);
        }
        FormField::SubTasks => return Vec::new(),
        FormField::Status => (
            form.draft.status.title(),
            theme.status_color(form.draft.status),
        ),
        FormField::Priority => (
            form.draft.priority.label(),
            theme.priority_color(form.draft.priority),
        ),
        FormField::Category => (form.draft.category.as_str(), theme.text),
    };
    let style = Style::default().fg(color).bg(bg);
    if focused {
        vec![Span::styled(format!("\u{25C2} {} \u{25B8}", value), style)]
    } else {
        vec![Span::styled(format!("  {}", value), style)]
    }
}

#[cfg(test)]
mod tests {
    use crate::model::session::Role;
    use crate::tui::app::tests::test_app;
    use crate::tui::input::tests::{ctrl, press, type_str};
    use crate::tui::render::test_helpers::*;
    use crossterm::event::KeyCode;

    #[test]
    fn new_task_form() {
        let (_dir, mut app) = test_app(Some(Role::TeamLead));
        press(&mut app, KeyCode::Char('n'));
        let output = render_app(&app);
        assert!(output.contains("Create New Task"));
        assert!(output.contains("What needs to be done?"));
        assert!(output.contains("AI Checklist Breakdown"));
        assert!(output.contains("Smart Breakdown"));
        assert!(output.contains("Ctrl-S Create Task"));
        assert!(output.contains("To Do"));
    }

    #[test]
    fn edit_form_shows_task_values() {
        let (_dir, mut app) = test_app(Some(Role::TeamLead));
        press(&mut app, KeyCode::Char('e'));
        let output = render_app(&app);
        assert!(output.contains("Edit Task"));
        assert!(output.contains("Redesign UI components"));
        assert!(output.contains("2024-11-25"));
        assert!(output.contains("Ctrl-S Update Task"));
    }

    #[test]
    fn focused_choice_shows_arrows() {
        let (_dir, mut app) = test_app(Some(Role::TeamLead));
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        let output = render_app(&app);
        assert!(output.contains("\u{25C2} Medium \u{25B8}"));
    }

    #[test]
    fn checklist_and_generating_state() {
        let (_dir, mut app) = test_app(Some(Role::TeamLead));
        press(&mut app, KeyCode::Char('e'));
        ctrl(&mut app, 'b');
        assert!(render_app(&app).contains("AI Generating..."));

        let event = app.worker().wait(std::time::Duration::from_secs(5)).unwrap();
        app.handle_worker_event(event);
        let output = render_app(&app);
        assert!(output.contains(" 1. Plan Redesign UI components"));
        assert!(output.contains(" 2. Ship it"));
        assert!(!output.contains("AI Generating..."));
    }

    #[test]
    fn missing_title_error_is_shown() {
        let (_dir, mut app) = test_app(Some(Role::TeamLead));
        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "   ");
        ctrl(&mut app, 's');
        assert!(render_app(&app).contains("Title is required"));
    }
}

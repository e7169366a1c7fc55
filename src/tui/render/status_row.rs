use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::helpers::push_right_aligned;
use crate::tui::app::{App, Mode, View};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let (mut spans, hint) = match app.mode {
        Mode::Search => (
            vec![
                Span::styled(
                    format!("/{}", app.search.text()),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
            ],
            "Enter keep  Esc clear".to_string(),
        ),
        Mode::Form => (Vec::new(), "Tab next field  \u{2190}/\u{2192} change  Esc cancel".to_string()),
        Mode::Confirm => (Vec::new(), "y delete  n cancel".to_string()),
        Mode::Navigate | Mode::Login => {
            let left = if let Some(msg) = &app.status_message {
                vec![Span::styled(
                    msg.clone(),
                    Style::default().fg(app.theme.yellow).bg(bg),
                )]
            } else if !app.workspace.query.is_empty() && app.view != View::Advisor {
                vec![Span::styled(format!("/{}", app.workspace.query), dim)]
            } else {
                Vec::new()
            };
            (left, navigate_hint(app))
        }
    };

    push_right_aligned(
        &mut spans,
        vec![Span::styled(format!("{} ", hint), dim)],
        width,
        Style::default().bg(bg),
    );

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Key hints for the current tab; edit keys only for the team lead
fn navigate_hint(app: &App) -> String {
    let mut keys: Vec<&str> = Vec::new();
    if app.is_elevated() && app.view != View::Advisor {
        keys.push("n new");
    }
    match app.view {
        View::Board => {
            if app.is_elevated() {
                keys.push("e edit");
                keys.push("d delete");
            }
            keys.push("space toggle");
            keys.push("/ search");
        }
        View::Dashboard | View::Analytics => keys.push("/ search"),
        View::Advisor => keys.push("r refresh"),
    }
    keys.push("tab view");
    keys.push("L sign out");
    keys.push("q quit");
    keys.join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::session::Role;
    use crate::tui::app::tests::test_app;
    use crate::tui::input::tests::{press, type_str};
    use crate::tui::render::test_helpers::*;
    use crossterm::event::KeyCode;

    fn draw(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, app, area);
        })
    }

    #[test]
    fn team_lead_board_hints() {
        let (_dir, app) = test_app(Some(Role::TeamLead));
        let output = draw(&app);
        assert!(output.contains("n new  e edit  d delete  space toggle"));
        assert!(output.ends_with("q quit"));
    }

    #[test]
    fn employee_gets_no_edit_hints() {
        let (_dir, app) = test_app(Some(Role::Employee));
        let output = draw(&app);
        assert!(!output.contains("n new"));
        assert!(!output.contains("d delete"));
        assert!(output.contains("space toggle"));
    }

    #[test]
    fn advisor_offers_refresh() {
        let (_dir, mut app) = test_app(Some(Role::Employee));
        app.view = View::Advisor;
        assert!(draw(&app).contains("r refresh"));
    }

    #[test]
    fn search_prompt_and_kept_query() {
        let (_dir, mut app) = test_app(Some(Role::Employee));
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "budget");
        let output = draw(&app);
        assert!(output.starts_with("/budget\u{258C}"));
        assert!(output.contains("Enter keep  Esc clear"));

        press(&mut app, KeyCode::Enter);
        assert!(draw(&app).starts_with("/budget"));
    }

    #[test]
    fn status_message_takes_the_left_side() {
        let (_dir, mut app) = test_app(Some(Role::Employee));
        press(&mut app, KeyCode::Char('n'));
        assert!(draw(&app).starts_with("creating tasks requires TL access"));
    }
}

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use super::helpers::{centered_rect_fixed, input_spans};
use crate::tui::app::{App, LoginField};

const CARD_W: u16 = 48;
const CARD_H: u16 = 20;

/// Full-screen sign-in card
pub fn render_login_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let card = centered_rect_fixed(CARD_W, CARD_H, area);
    frame.render_widget(Clear, card);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let login = &app.login;
    let pending = login.auth.is_pending();
    let label_style = |focused: bool| {
        if focused {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        }
    };
    let id_focused = login.focus == LoginField::EmployeeId && !pending;
    let pw_focused = login.focus == LoginField::Password && !pending;

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "SyncroTask AI",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(Span::styled(
            "Workspace Secure Access",
            Style::default().fg(app.theme.dim).bg(bg),
        ))
        .centered(),
        Line::from(""),
        Line::from(Span::styled(" Employee ID", label_style(id_focused))),
    ];

    let mut id_row = vec![Span::styled(" ", Style::default().bg(bg))];
    id_row.extend(input_spans(
        &login.employee_id,
        id_focused,
        "e.g. TL1001 or EMP2001",
        false,
        &app.theme,
        app.theme.selection_bg,
    ));
    lines.push(Line::from(id_row));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Password", label_style(pw_focused))));
    let mut pw_row = vec![Span::styled(" ", Style::default().bg(bg))];
    pw_row.extend(input_spans(
        &login.password,
        pw_focused,
        "\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}",
        true,
        &app.theme,
        app.theme.selection_bg,
    ));
    lines.push(Line::from(pw_row));
    lines.push(Line::from(""));

    if let Some(error) = login.auth.error() {
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(app.theme.red).bg(bg),
        )));
    } else {
        lines.push(Line::from(""));
    }

    let button = if pending {
        Span::styled(
            "Signing in...",
            Style::default()
                .fg(app.theme.dim)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(
            "[ Sign In ]",
            Style::default()
                .fg(app.theme.background)
                .bg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        )
    };
    lines.push(Line::from(button).centered());
    lines.push(Line::from(""));

    let dim = Style::default().fg(app.theme.dim).bg(bg);
    lines.push(Line::from(Span::styled(
        " Login Credentials",
        Style::default().fg(app.theme.text).bg(bg),
    )));
    lines.push(Line::from(Span::styled("   TL: TL1001 / tl@pass", dim)));
    lines.push(Line::from(Span::styled("   Employee: EMP2001 / emp@pass", dim)));

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}

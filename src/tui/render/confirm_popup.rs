use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use super::helpers::{centered_rect_fixed, wrap_text};
use crate::tui::app::App;

const POPUP_W: u16 = 50;

/// Delete confirmation over the board
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(confirm) = app.confirm.as_ref() else {
        return;
    };
    let bg = app.theme.background;
    let inner_w = (POPUP_W as usize).saturating_sub(4);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Are you sure you want to delete this task?",
            Style::default().fg(app.theme.text_bright).bg(bg),
        )),
        Line::from(""),
    ];
    for row in wrap_text(" ", &format!("\"{}\"", confirm.title), inner_w) {
        lines.push(Line::from(Span::styled(
            row,
            Style::default()
                .fg(app.theme.text)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" y ", Style::default().fg(app.theme.red).bg(bg)),
        Span::styled("delete  ", Style::default().fg(app.theme.dim).bg(bg)),
        Span::styled("n ", Style::default().fg(app.theme.text_bright).bg(bg)),
        Span::styled("cancel", Style::default().fg(app.theme.dim).bg(bg)),
    ]));

    let height = lines.len() as u16 + 2;
    let popup = centered_rect_fixed(POPUP_W, height, area);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .title(Span::styled(
            " Delete Task ",
            Style::default()
                .fg(app.theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

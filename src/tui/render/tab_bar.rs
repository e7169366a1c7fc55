use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::helpers::{push_right_aligned, spans_width};
use crate::tui::app::{App, View};

/// Render the tab bar: brand, view tabs and the signed-in user, with a
/// separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Split into tab row and separator row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    // Brand
    spans.push(Span::styled(" ", bg_style));
    spans.push(Span::styled(
        "\u{25C6}",
        Style::default().fg(app.theme.highlight).bg(bg),
    ));
    spans.push(Span::styled(
        " SyncroTask ",
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    sep_cols.push(spans_width(&spans));
    spans.push(sep.clone());

    for (i, view) in View::ALL.iter().enumerate() {
        let style = tab_style(app, app.view == *view);
        spans.push(Span::styled(format!(" {} {} ", i + 1, view.label()), style));
        sep_cols.push(spans_width(&spans));
        spans.push(sep.clone());
    }

    // Signed-in user, right-aligned
    if let Some(session) = app.session() {
        let right = vec![
            Span::styled(
                session.employee_id.clone(),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ),
            Span::styled(
                format!(" \u{00B7} {} ", session.role.label()),
                Style::default().fg(app.theme.dim).bg(bg),
            ),
        ];
        push_right_aligned(&mut spans, right, area.width as usize, bg_style);
    }

    let line = Line::from(spans);
    let tabs = Paragraph::new(line).style(bg_style);
    frame.render_widget(tabs, area);
    sep_cols
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let bg = app.theme.background;
    let dim = app.theme.dim;

    // Active search filter shows at the right end of the separator
    let mut indicator: Vec<Span> = Vec::new();
    if !app.workspace.query.is_empty() && app.view != View::Advisor {
        indicator.push(Span::styled(
            "search: ",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
        indicator.push(Span::styled(
            app.workspace.query.clone(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    }

    // +2: one space before indicator, one space after (right edge buffer)
    let separator_end = if indicator.is_empty() {
        width
    } else {
        width.saturating_sub(spans_width(&indicator) + 2)
    };

    let mut sep_text = String::with_capacity(separator_end * 3);
    for col in 0..separator_end {
        if sep_cols.contains(&col) {
            sep_text.push('\u{2534}');
        } else {
            sep_text.push('\u{2500}');
        }
    }
    let mut spans = vec![Span::styled(sep_text, Style::default().fg(dim).bg(bg))];
    if !indicator.is_empty() {
        spans.push(Span::styled(" ", Style::default().bg(bg)));
        spans.extend(indicator);
    }

    let sep_widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(sep_widget, area);
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}

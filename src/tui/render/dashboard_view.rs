use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::helpers::bar;
use crate::ops::analytics::{BoardStats, Slice};
use crate::tui::app::App;

/// Stat cards over the status distribution
pub fn render_dashboard_view(frame: &mut Frame, app: &App, area: Rect) {
    let stats = BoardStats::compute(&app.visible_tasks());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    let cards = [
        ("Completion Rate", format!("{}%", stats.completion_rate()), app.theme.green),
        ("Active Tasks", stats.in_progress.to_string(), app.theme.blue),
        ("Critical Tasks", stats.high_priority.to_string(), app.theme.red),
        ("Total Volume", stats.total.to_string(), app.theme.highlight),
    ];
    let card_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);
    for ((label, value, color), card_area) in cards.into_iter().zip(card_areas.iter()) {
        render_stat_card(frame, app, label, &value, color, *card_area);
    }

    render_distribution(
        frame,
        app,
        "Task Distribution",
        &stats.status_distribution(),
        &status_colors(app),
        stats.total,
        rows[1],
    );
}

/// Both distributions as bar charts
pub fn render_analytics_view(frame: &mut Frame, app: &App, area: Rect) {
    let stats = BoardStats::compute(&app.visible_tasks());

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2); 2])
        .split(area);

    render_distribution(
        frame,
        app,
        "Task Distribution",
        &stats.status_distribution(),
        &status_colors(app),
        stats.total,
        halves[0],
    );
    render_distribution(
        frame,
        app,
        "Priority Breakdown",
        &stats.priority_distribution(),
        &[app.theme.red, app.theme.yellow, app.theme.green],
        stats.total,
        halves[1],
    );
}

/// Completed / In Progress / To Do, matching `status_distribution` order
fn status_colors(app: &App) -> [Color; 3] {
    [app.theme.green, app.theme.blue, app.theme.text]
}

fn render_stat_card(
    frame: &mut Frame,
    app: &App,
    label: &str,
    value: &str,
    color: Color,
    area: Rect,
) {
    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", label),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
        Line::from(Span::styled(
            format!(" {}", value),
            Style::default()
                .fg(color)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_distribution(
    frame: &mut Frame,
    app: &App,
    title: &str,
    slices: &[Slice],
    colors: &[Color],
    total: usize,
    area: Rect,
) {
    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // " ● Name        N  NN%  ████"
    let label_w = 12;
    let bar_w = (inner.width as usize).saturating_sub(label_w + 16);
    let mut lines = vec![Line::from("")];
    for (slice, color) in slices.iter().zip(colors) {
        let pct = if total == 0 {
            0
        } else {
            (slice.value as f64 * 100.0 / total as f64).round() as u32
        };
        lines.push(Line::from(vec![
            Span::styled(" \u{25CF} ", Style::default().fg(*color).bg(bg)),
            Span::styled(
                format!("{:<width$}", slice.name, width = label_w),
                Style::default().fg(app.theme.text).bg(bg),
            ),
            Span::styled(
                format!("{:>3} {:>4}%  ", slice.value, pct),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ),
            Span::styled(bar(slice.value, total, bar_w), Style::default().fg(*color).bg(bg)),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::app::App;

const TITLE: &str = "Syncro AI Assistant";
const SUBTITLE: &str =
    "Personalized productivity insights powered by Gemini for your specific workload.";

/// What each info card promises, shown under the advice
const INFO_CARDS: [(&str, &str); 2] = [
    (
        "Identify Blockers",
        "AI analyzes your \"In Progress\" tasks to find potential delays.",
    ),
    (
        "Prioritization Check",
        "Ensures your focus aligns with deadlines and priority levels.",
    ),
];

pub fn render_advisor_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(5),
        ])
        .split(area);

    let header = vec![
        Line::from(Span::styled(
            format!(" \u{2726} {}", TITLE),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("   {}", SUBTITLE),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];
    frame.render_widget(Paragraph::new(header).style(Style::default().bg(bg)), rows[0]);

    let plan = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .title(Span::styled(
            " Smart Productivity Plan ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(
            Line::from(Span::styled(
                " r refresh ",
                Style::default().fg(app.theme.dim).bg(bg),
            ))
            .right_aligned(),
        )
        .style(Style::default().bg(bg));

    let body = if app.advisor.is_loading() {
        Paragraph::new(Line::from(Span::styled(
            "Analyzing your workload...",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        )))
    } else {
        let lines: Vec<Line> = app
            .advisor
            .text()
            .lines()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(app.theme.text).bg(bg))))
            .collect();
        Paragraph::new(lines).wrap(Wrap { trim: false })
    };
    frame.render_widget(body.block(plan), rows[1]);

    let card_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2); 2])
        .split(rows[2]);
    for ((title, blurb), card_area) in INFO_CARDS.iter().zip(card_areas.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.dim).bg(bg))
            .title(Span::styled(
                format!(" {} ", title),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ))
            .style(Style::default().bg(bg));
        let card = Paragraph::new(Span::styled(
            *blurb,
            Style::default().fg(app.theme.dim).bg(bg),
        ))
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(card, *card_area);
    }
}

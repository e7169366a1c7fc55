use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::helpers::pad_to;
use crate::model::task::{Task, TaskStatus};
use crate::ops::board::{self, Column};
use crate::tui::app::App;
use crate::util::unicode;

/// Rows per card, including the blank spacer below it
const CARD_HEIGHT: usize = 6;

/// Render the three status columns side by side
pub fn render_board_view(frame: &mut Frame, app: &App, area: Rect) {
    let tasks = app.visible_tasks();
    let columns = board::partition(&tasks);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); board::COLUMN_COUNT])
        .split(area);

    for (i, column) in columns.iter().enumerate() {
        let cursor_row = (i == app.column).then_some(app.row);
        render_column(frame, app, column, cursor_row, chunks[i]);
    }
}

fn render_column(
    frame: &mut Frame,
    app: &App,
    column: &Column<'_>,
    cursor_row: Option<usize>,
    area: Rect,
) {
    let bg = app.theme.background;
    let accent = app.theme.status_color(column.status);
    let border_color = if cursor_row.is_some() {
        app.theme.selection_border
    } else {
        app.theme.dim
    };

    let title = Line::from(vec![
        Span::styled(" \u{25CF} ", Style::default().fg(accent).bg(bg)),
        Span::styled(
            column.title(),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", column.len()),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .title(title)
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();

    if column.accepts_new(app.role()) {
        lines.push(Line::from(Span::styled(
            " + Add Task (n)",
            Style::default().fg(app.theme.highlight).bg(bg),
        )));
        lines.push(Line::from(""));
    }

    if column.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" {}", board::empty_label(app.role())),
            Style::default()
                .fg(app.theme.dim)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        )));
    } else {
        // Scroll so the cursor card stays visible
        let room = (inner.height as usize).saturating_sub(lines.len()) / CARD_HEIGHT;
        let first = match cursor_row {
            Some(row) if room > 0 && row >= room => row + 1 - room,
            _ => 0,
        };
        for (i, task) in column.tasks.iter().enumerate().skip(first) {
            lines.extend(card_lines(app, task, cursor_row == Some(i), width));
            lines.push(Line::from(""));
        }
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, inner);
}

/// Five rows: badge and category, title, description, due date, completion
fn card_lines<'a>(app: &App, task: &'a Task, selected: bool, width: usize) -> Vec<Line<'a>> {
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let fill = Style::default().bg(bg);
    let marker = if selected {
        Span::styled("\u{258C} ", Style::default().fg(app.theme.highlight).bg(bg))
    } else {
        Span::styled("  ", fill)
    };
    let content_w = width.saturating_sub(2);
    let is_done = task.status == TaskStatus::Done;

    // Priority badge and category
    let mut head = vec![
        marker.clone(),
        Span::styled(
            format!(" {} ", task.priority.label()),
            Style::default()
                .fg(app.theme.background)
                .bg(app.theme.priority_color(task.priority))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", task.category),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ];
    pad_to(&mut head, width, fill);

    // Title
    let mut title_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    if is_done {
        title_style = title_style
            .fg(app.theme.dim)
            .add_modifier(Modifier::CROSSED_OUT);
    }
    let mut title = vec![
        marker.clone(),
        Span::styled(unicode::truncate_to_width(&task.title, content_w), title_style),
    ];
    pad_to(&mut title, width, fill);

    // Description (first line only)
    let first_line = task.description.lines().next().unwrap_or("");
    let mut desc = vec![
        marker.clone(),
        Span::styled(
            unicode::truncate_to_width(first_line, content_w),
            Style::default().fg(app.theme.text).bg(bg),
        ),
    ];
    pad_to(&mut desc, width, fill);

    // Due date and checklist size
    let mut meta = format!("\u{25F7} {}", task.due_date);
    match task.subtasks().len() {
        0 => {}
        1 => meta.push_str(" \u{00B7} 1 step"),
        n => meta.push_str(&format!(" \u{00B7} {} steps", n)),
    }
    let (done_label, done_color) = if is_done {
        ("\u{2713} Done", app.theme.green)
    } else {
        ("\u{25CB} Mark as Complete", app.theme.dim)
    };
    let mut foot = vec![
        marker.clone(),
        Span::styled(meta, Style::default().fg(app.theme.dim).bg(bg)),
    ];
    pad_to(&mut foot, width, fill);

    let mut action = vec![
        marker,
        Span::styled(done_label, Style::default().fg(done_color).bg(bg)),
    ];
    pad_to(&mut action, width, fill);

    vec![
        Line::from(head),
        Line::from(title),
        Line::from(desc),
        Line::from(foot),
        Line::from(action),
    ]
}

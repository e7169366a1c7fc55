use serde::Serialize;

use crate::model::session::{Role, Session};
use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::ops::analytics::{BoardStats, Slice};
use crate::ops::board::{self, Column};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ColumnJson<'a> {
    pub status: TaskStatus,
    pub title: &'static str,
    pub tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsJson {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub todo: usize,
    pub high_priority: usize,
    pub completion_rate: u32,
    pub status_distribution: Vec<SliceJson>,
    pub priority_distribution: Vec<SliceJson>,
}

#[derive(Serialize)]
pub struct SliceJson {
    pub name: &'static str,
    pub value: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoamiJson<'a> {
    pub signed_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<&'a Session>,
}

#[derive(Serialize)]
pub struct AdviceJson<'a> {
    pub advice: &'a str,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn column_to_json<'a>(column: &Column<'a>) -> ColumnJson<'a> {
    ColumnJson {
        status: column.status,
        title: column.title(),
        tasks: column.tasks.clone(),
    }
}

fn slices_to_json(slices: &[Slice]) -> Vec<SliceJson> {
    slices
        .iter()
        .map(|s| SliceJson {
            name: s.name,
            value: s.value,
        })
        .collect()
}

pub fn stats_to_json(stats: &BoardStats) -> StatsJson {
    StatsJson {
        total: stats.total,
        completed: stats.completed,
        in_progress: stats.in_progress,
        todo: stats.todo(),
        high_priority: stats.high_priority,
        completion_rate: stats.completion_rate(),
        status_distribution: slices_to_json(&stats.status_distribution()),
        priority_distribution: slices_to_json(&stats.priority_distribution()),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn status_char(status: TaskStatus) -> char {
    match status {
        TaskStatus::Todo => ' ',
        TaskStatus::InProgress => '>',
        TaskStatus::Done => 'x',
    }
}

fn priority_marker(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::High => " !!",
        TaskPriority::Medium => " !",
        TaskPriority::Low => "",
    }
}

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task) -> String {
    let steps = match task.subtasks().len() {
        0 => String::new(),
        1 => " (1 step)".to_string(),
        n => format!(" ({} steps)", n),
    };
    format!(
        "[{}] {} {}{} #{} due {}{}",
        status_char(task.status),
        task.id,
        task.title,
        priority_marker(task.priority),
        task.category,
        task.due_date,
        steps
    )
}

/// Format detailed task view
pub fn format_task_detail(task: &Task) -> Vec<String> {
    let mut lines = vec![
        format!("[{}] {} {}", status_char(task.status), task.id, task.title),
        format!("status: {}", task.status.title()),
        format!("priority: {}", task.priority),
        format!("category: {}", task.category),
        format!("due: {}", task.due_date),
    ];

    if !task.description.is_empty() {
        lines.push("description:".to_string());
        for line in task.description.lines() {
            lines.push(format!("  {}", line));
        }
    }

    if !task.subtasks().is_empty() {
        lines.push(String::new());
        lines.push("subtasks:".to_string());
        for (i, sub) in task.subtasks().iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, sub));
        }
    }

    lines
}

/// Format the three status columns, one block each
pub fn format_board(columns: &[Column<'_>], role: Option<Role>) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!("== {} ({}) ==", column.title(), column.len()));
        if column.is_empty() {
            lines.push(format!("  {}", board::empty_label(role)));
        }
        for task in &column.tasks {
            lines.push(format!("  {}", format_task_line(task)));
        }
    }
    lines
}

fn format_bar(name: &str, value: usize, max: usize, width: usize) -> String {
    let filled = if max == 0 { 0 } else { value * width / max };
    format!(
        "  {:<12}{:>4}  {}",
        name,
        value,
        "#".repeat(filled)
    )
}

/// Format stat cards followed by both distributions
pub fn format_stats(stats: &BoardStats) -> Vec<String> {
    let mut lines = vec![
        format!("Completion Rate  {}%", stats.completion_rate()),
        format!("Active Tasks     {}", stats.in_progress),
        format!("Critical Tasks   {}", stats.high_priority),
        format!("Total Volume     {}", stats.total),
        String::new(),
        "Task Distribution".to_string(),
    ];
    let max = stats.total;
    for slice in stats.status_distribution() {
        lines.push(format_bar(slice.name, slice.value, max, 20));
    }
    lines.push(String::new());
    lines.push("Priority Breakdown".to_string());
    for slice in stats.priority_distribution() {
        lines.push(format_bar(slice.name, slice.value, max, 20));
    }
    lines
}

pub fn format_session(session: &Session) -> String {
    format!("{} ({})", session.employee_id, session.role.badge())
}

/// Parse a status string, with a message listing accepted values
pub fn parse_status(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(s)
        .ok_or_else(|| format!("unknown status '{}' (expected: todo, in-progress, done)", s))
}

/// Parse a priority string, with a message listing accepted values
pub fn parse_priority(s: &str) -> Result<TaskPriority, String> {
    TaskPriority::parse(s)
        .ok_or_else(|| format!("unknown priority '{}' (expected: low, medium, high)", s))
}

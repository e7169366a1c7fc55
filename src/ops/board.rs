use crate::model::session::Role;
use crate::model::task::{Task, TaskStatus};

/// One of the three fixed status columns, holding tasks in collection order
#[derive(Debug, Clone)]
pub struct Column<'a> {
    pub status: TaskStatus,
    pub tasks: Vec<&'a Task>,
}

impl<'a> Column<'a> {
    pub fn title(&self) -> &'static str {
        self.status.title()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether the column offers an "add task" affordance: To Do only, and
    /// only for team leads.
    pub fn accepts_new(&self, role: Option<Role>) -> bool {
        self.status == TaskStatus::Todo && role.is_some_and(Role::is_elevated)
    }
}

/// Placeholder for an empty column
pub fn empty_label(role: Option<Role>) -> &'static str {
    if role.is_some_and(Role::is_elevated) {
        "No tasks yet"
    } else {
        "No tasks assigned"
    }
}

/// Number of board columns
pub const COLUMN_COUNT: usize = 3;

/// Split tasks into To Do / In Progress / Completed
pub fn partition(tasks: &[Task]) -> [Column<'_>; COLUMN_COUNT] {
    TaskStatus::ALL.map(|status| Column {
        status,
        tasks: tasks.iter().filter(|t| t.status == status).collect(),
    })
}

/// Column index of a status in board order
pub fn column_index(status: TaskStatus) -> usize {
    match status {
        TaskStatus::Todo => 0,
        TaskStatus::InProgress => 1,
        TaskStatus::Done => 2,
    }
}

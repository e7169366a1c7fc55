use std::borrow::Cow;

use rand::Rng;

use crate::model::task::{Task, TaskFields, TaskStatus};
use crate::model::workspace::Workspace;

/// Characters used for generated task IDs
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
/// Length of generated task IDs
pub const ID_LEN: usize = 9;

/// Outcome of a task mutation. Rejections leave the collection untouched and
/// are not errors; callers decide whether to mention them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// The collection changed; carries the affected task ID
    Applied(String),
    /// The signed-in role may not perform this mutation
    Denied,
    /// No task has the given ID
    NotFound,
    /// The user declined the confirmation prompt
    Cancelled,
}

impl Mutation {
    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied(_))
    }
}

// ---------------------------------------------------------------------------
// IDs
// ---------------------------------------------------------------------------

/// Generate an ID not used by any task in `existing`.
pub fn generate_id(existing: &[Task]) -> String {
    generate_id_with(&mut rand::rng(), existing)
}

/// Generate with a caller-supplied RNG. Collisions are retried until a fresh
/// ID comes up.
pub fn generate_id_with<R: Rng + ?Sized>(rng: &mut R, existing: &[Task]) -> String {
    loop {
        let id: String = (0..ID_LEN)
            .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
            .collect();
        if !existing.iter().any(|t| t.id == id) {
            return id;
        }
    }
}

// ---------------------------------------------------------------------------
// Role-gated mutations
// ---------------------------------------------------------------------------

/// Append a new task. Team leads only.
pub fn create_task(ws: &mut Workspace, fields: TaskFields) -> Mutation {
    if !ws.is_elevated() {
        return Mutation::Denied;
    }
    let id = generate_id(&ws.tasks);
    ws.tasks.push(Task::from_fields(id.clone(), fields));
    Mutation::Applied(id)
}

/// Replace the task with the same ID wholesale. Team leads only.
pub fn update_task(ws: &mut Workspace, task: Task) -> Mutation {
    if !ws.is_elevated() {
        return Mutation::Denied;
    }
    match ws.tasks.iter_mut().find(|t| t.id == task.id) {
        Some(slot) => {
            let id = task.id.clone();
            *slot = task;
            Mutation::Applied(id)
        }
        None => Mutation::NotFound,
    }
}

/// Remove a task after `confirm` agrees. Team leads only; the prompt is not
/// shown to anyone else.
pub fn delete_task(
    ws: &mut Workspace,
    task_id: &str,
    confirm: impl FnOnce(&Task) -> bool,
) -> Mutation {
    if !ws.is_elevated() {
        return Mutation::Denied;
    }
    let Some(pos) = ws.tasks.iter().position(|t| t.id == task_id) else {
        return Mutation::NotFound;
    };
    if !confirm(&ws.tasks[pos]) {
        return Mutation::Cancelled;
    }
    let removed = ws.tasks.remove(pos);
    Mutation::Applied(removed.id)
}

/// Flip between Done and To Do. Any signed-in role. In Progress goes to Done.
pub fn toggle_status(ws: &mut Workspace, task_id: &str) -> Mutation {
    if ws.session.is_none() {
        return Mutation::Denied;
    }
    match ws.tasks.iter_mut().find(|t| t.id == task_id) {
        Some(task) => {
            task.status = toggled(task.status);
            Mutation::Applied(task.id.clone())
        }
        None => Mutation::NotFound,
    }
}

/// Status after a completion toggle
pub fn toggled(status: TaskStatus) -> TaskStatus {
    if status == TaskStatus::Done {
        TaskStatus::Todo
    } else {
        TaskStatus::Done
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Tasks whose title, description or category contains `query`
/// (case-insensitive). An empty query borrows the input unchanged.
pub fn filter_tasks<'a>(tasks: &'a [Task], query: &str) -> Cow<'a, [Task]> {
    if query.is_empty() {
        return Cow::Borrowed(tasks);
    }
    let needle = query.to_lowercase();
    Cow::Owned(
        tasks
            .iter()
            .filter(|t| matches_query(t, &needle))
            .cloned()
            .collect(),
    )
}

/// The workspace's tasks under its current search query
pub fn visible_tasks(ws: &Workspace) -> Cow<'_, [Task]> {
    filter_tasks(&ws.tasks, &ws.query)
}

fn matches_query(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle)
        || task.description.to_lowercase().contains(needle)
        || task.category.to_lowercase().contains(needle)
}

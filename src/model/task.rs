use std::fmt;

use serde::{Deserialize, Serialize};

/// Board column a task lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "TODO")]
    Todo,
    #[serde(rename = "IN_PROGRESS")]
    InProgress,
    #[serde(rename = "DONE")]
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// The persisted identifier (`TODO`, `IN_PROGRESS`, `DONE`)
    pub fn key(self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }

    /// Column heading shown on the board
    pub fn title(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Completed",
        }
    }

    /// Parse a user-supplied status name. Accepts the persisted keys and a few
    /// friendlier spellings.
    pub fn parse(s: &str) -> Option<TaskStatus> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "todo" | "to_do" => Some(TaskStatus::Todo),
            "in_progress" | "inprogress" | "active" | "doing" => Some(TaskStatus::InProgress),
            "done" | "completed" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    /// Next status in board order, wrapping around
    pub fn next(self) -> TaskStatus {
        match self {
            TaskStatus::Todo => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Todo,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Display-only priority label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn label(self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<TaskPriority> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Some(TaskPriority::Low),
            "medium" | "med" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            _ => None,
        }
    }

    /// Next priority, wrapping around
    pub fn next(self) -> TaskPriority {
        match self {
            TaskPriority::Low => TaskPriority::Medium,
            TaskPriority::Medium => TaskPriority::High,
            TaskPriority::High => TaskPriority::Low,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything a task carries except its identifier. This is the payload of a
/// create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub category: String,
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_tasks: Option<Vec<String>>,
}

/// A single unit of work on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub category: String,
    /// Calendar date string, not validated
    pub due_date: String,
    /// Advisory checklist; items carry no completion state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_tasks: Option<Vec<String>>,
}

impl Task {
    /// Attach an identifier to a field set
    pub fn from_fields(id: String, fields: TaskFields) -> Self {
        Task {
            id,
            title: fields.title,
            description: fields.description,
            status: fields.status,
            priority: fields.priority,
            category: fields.category,
            due_date: fields.due_date,
            sub_tasks: fields.sub_tasks,
        }
    }

    /// Split off the identifier
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            category: self.category.clone(),
            due_date: self.due_date.clone(),
            sub_tasks: self.sub_tasks.clone(),
        }
    }

    /// Subtasks as a slice (empty when absent)
    pub fn subtasks(&self) -> &[String] {
        self.sub_tasks.as_deref().unwrap_or(&[])
    }
}

/// Sample tasks a fresh board starts with
pub fn seed_tasks() -> Vec<Task> {
    vec![
        Task {
            id: "1".into(),
            title: "Q4 Budget Proposal".into(),
            description: "Review last year expenses and draft the upcoming budget for stakeholders."
                .into(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            category: "Admin".into(),
            due_date: "2024-11-20".into(),
            sub_tasks: Some(vec![
                "Review Q3 stats".into(),
                "Consult with HR".into(),
                "Draft spreadsheet".into(),
            ]),
        },
        Task {
            id: "2".into(),
            title: "Redesign UI components".into(),
            description: "Update the main dashboard components to match the new style guide."
                .into(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            category: "Design".into(),
            due_date: "2024-11-25".into(),
            sub_tasks: None,
        },
        Task {
            id: "3".into(),
            title: "Client Onboarding".into(),
            description: "Finalize contracts and send welcome package to NewCo.".into(),
            status: TaskStatus::Done,
            priority: TaskPriority::Medium,
            category: "Sales".into(),
            due_date: "2024-11-15".into(),
            sub_tasks: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_with_original_field_names() {
        let task = &seed_tasks()[0];
        let json = serde_json::to_value(task).unwrap();
        assert_eq!(json["status"], "IN_PROGRESS");
        assert_eq!(json["priority"], "High");
        assert_eq!(json["dueDate"], "2024-11-20");
        assert_eq!(json["subTasks"][1], "Consult with HR");
    }

    #[test]
    fn absent_subtasks_are_omitted() {
        let task = &seed_tasks()[1];
        let json = serde_json::to_string(task).unwrap();
        assert!(!json.contains("subTasks"));
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sub_tasks, None);
        assert!(back.subtasks().is_empty());
    }

    #[test]
    fn parse_status_spellings() {
        assert_eq!(TaskStatus::parse("TODO"), Some(TaskStatus::Todo));
        assert_eq!(TaskStatus::parse("to-do"), Some(TaskStatus::Todo));
        assert_eq!(TaskStatus::parse("In Progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("completed"), Some(TaskStatus::Done));
        assert_eq!(TaskStatus::parse("blocked"), None);
    }

    #[test]
    fn parse_priority_is_case_insensitive() {
        assert_eq!(TaskPriority::parse("HIGH"), Some(TaskPriority::High));
        assert_eq!(TaskPriority::parse("med"), Some(TaskPriority::Medium));
        assert_eq!(TaskPriority::parse("urgent"), None);
    }

    #[test]
    fn fields_round_trip_through_from_fields() {
        let task = seed_tasks().remove(0);
        let rebuilt = Task::from_fields(task.id.clone(), task.fields());
        assert_eq!(rebuilt, task);
    }

    #[test]
    fn seed_ids_are_unique() {
        let tasks = seed_tasks();
        let mut ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), tasks.len());
    }
}

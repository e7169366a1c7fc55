use crate::model::task::{Task, TaskFields, TaskPriority, TaskStatus};

/// Today's local date as `YYYY-MM-DD`, the default due date
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// What submitting a draft asks the store to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    Create(TaskFields),
    /// Replace the task with the carried ID
    Update(Task),
}

/// Local, unsaved state of the task form. Nothing here touches the store
/// until `into_save` hands a request to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// ID of the task being edited; None for a new task
    pub editing: Option<String>,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub category: String,
    pub due_date: String,
    pub sub_tasks: Vec<String>,
}

impl TaskDraft {
    /// Blank form: To Do, Medium, first configured category, due today
    pub fn new(categories: &[String], today: &str) -> Self {
        TaskDraft {
            editing: None,
            title: String::new(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            category: categories.first().cloned().unwrap_or_default(),
            due_date: today.to_string(),
            sub_tasks: Vec::new(),
        }
    }

    /// Form seeded from an existing task
    pub fn from_task(task: &Task) -> Self {
        TaskDraft {
            editing: Some(task.id.clone()),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            category: task.category.clone(),
            due_date: task.due_date.clone(),
            sub_tasks: task.subtasks().to_vec(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    /// The form refuses to save without a title
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// A breakdown needs something to break down
    pub fn can_breakdown(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }

    /// Replace the subtask list with a breakdown result
    pub fn apply_breakdown(&mut self, items: Vec<String>) {
        self.sub_tasks = items;
    }

    pub fn cycle_status(&mut self) {
        self.status = self.status.next();
    }

    pub fn cycle_priority(&mut self) {
        self.priority = self.priority.next();
    }

    /// Step to the next configured category. A category outside the list
    /// (e.g. from an imported task) jumps to the first one.
    pub fn cycle_category(&mut self, categories: &[String]) {
        if categories.is_empty() {
            return;
        }
        let next = match categories.iter().position(|c| *c == self.category) {
            Some(i) => (i + 1) % categories.len(),
            None => 0,
        };
        self.category = categories[next].clone();
    }

    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            category: self.category.clone(),
            due_date: self.due_date.clone(),
            sub_tasks: Some(self.sub_tasks.clone()),
        }
    }

    /// Consume the draft into a store request
    pub fn into_save(self) -> SaveRequest {
        let fields = self.fields();
        match self.editing {
            Some(id) => SaveRequest::Update(Task::from_fields(id, fields)),
            None => SaveRequest::Create(fields),
        }
    }
}

use crate::model::task::{Task, TaskPriority, TaskStatus};

/// Aggregate counts behind the dashboard and analytics views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub high_priority: usize,
    pub medium_priority: usize,
    pub low_priority: usize,
}

/// A labelled slice of a distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub name: &'static str,
    pub value: usize,
}

impl BoardStats {
    pub fn compute(tasks: &[Task]) -> Self {
        let mut stats = BoardStats {
            total: tasks.len(),
            ..Default::default()
        };
        for task in tasks {
            match task.status {
                TaskStatus::Done => stats.completed += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Todo => {}
            }
            match task.priority {
                TaskPriority::High => stats.high_priority += 1,
                TaskPriority::Medium => stats.medium_priority += 1,
                TaskPriority::Low => stats.low_priority += 1,
            }
        }
        stats
    }

    /// Whatever is neither completed nor in progress
    pub fn todo(&self) -> usize {
        self.total - self.completed - self.in_progress
    }

    /// Percentage of completed tasks, rounded half up. 0 for an empty board.
    pub fn completion_rate(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed * 100) as f64 / self.total as f64).round() as u32
    }

    /// Completed / In Progress / To Do
    pub fn status_distribution(&self) -> [Slice; 3] {
        [
            Slice {
                name: "Completed",
                value: self.completed,
            },
            Slice {
                name: "In Progress",
                value: self.in_progress,
            },
            Slice {
                name: "To Do",
                value: self.todo(),
            },
        ]
    }

    /// High / Medium / Low
    pub fn priority_distribution(&self) -> [Slice; 3] {
        [
            Slice {
                name: "High",
                value: self.high_priority,
            },
            Slice {
                name: "Medium",
                value: self.medium_priority,
            },
            Slice {
                name: "Low",
                value: self.low_priority,
            },
        ]
    }
}

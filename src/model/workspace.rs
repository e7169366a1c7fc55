use std::path::PathBuf;

use super::config::Config;
use super::session::{Role, Session};
use super::task::Task;

/// A fully loaded task board: the authoritative in-memory state
#[derive(Debug)]
pub struct Workspace {
    /// Directory containing `.syncrotask/`
    pub root: PathBuf,
    /// Path to the `.syncrotask/` directory
    pub data_dir: PathBuf,
    /// Parsed config.toml
    pub config: Config,
    /// Task collection in insertion order
    pub tasks: Vec<Task>,
    /// Signed-in user, if any
    pub session: Option<Session>,
    /// Current free-text search filter
    pub query: String,
}

impl Workspace {
    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(|s| s.role)
    }

    pub fn is_elevated(&self) -> bool {
        self.role().is_some_and(Role::is_elevated)
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

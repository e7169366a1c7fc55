use std::path::{Path, PathBuf};

use crate::io::config_io;
use crate::io::kv::{FileStore, KeyValueStore};
use crate::model::session::Session;
use crate::model::task::{Task, seed_tasks};
use crate::model::workspace::Workspace;

/// Name of the data directory that marks a task board
pub const DATA_DIR: &str = ".syncrotask";
/// Key holding the JSON array of tasks
pub const TASKS_KEY: &str = "syncrotask_data";
/// Key holding the JSON `{role, employeeId}` session record
pub const SESSION_KEY: &str = "syncrotask_session";

/// Error type for workspace I/O operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no task board found: no .syncrotask/ directory (run `syncrotask init`)")]
    NotAWorkspace,
    #[error("could not read {key}: {source}")]
    ReadError {
        key: String,
        source: std::io::Error,
    },
    #[error("could not write {key}: {source}")]
    WriteError {
        key: String,
        source: std::io::Error,
    },
    #[error("stored {key} is malformed: {source}")]
    ParseError {
        key: String,
        source: serde_json::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not serialize state: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover the task board by walking up from the given directory, looking
/// for a `.syncrotask/` subdirectory.
pub fn discover_workspace(start: &Path) -> Result<PathBuf, StoreError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(DATA_DIR).is_dir() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(StoreError::NotAWorkspace);
        }
    }
}

/// Load a complete workspace (config, tasks, session) from the given root.
pub fn load_workspace(root: &Path) -> Result<Workspace, StoreError> {
    let data_dir = root.join(DATA_DIR);
    if !data_dir.is_dir() {
        return Err(StoreError::NotAWorkspace);
    }

    let config = config_io::read_config(&data_dir)?;
    let store = FileStore::new(&data_dir);
    let tasks = load_tasks(&store)?;
    let session = load_session(&store)?;

    Ok(Workspace {
        root: root.to_path_buf(),
        data_dir,
        config,
        tasks,
        session,
        query: String::new(),
    })
}

/// The file-backed store for a loaded workspace
pub fn file_store(workspace: &Workspace) -> FileStore {
    FileStore::new(&workspace.data_dir)
}

/// Load the task collection. A board that has never been saved starts from
/// the sample tasks; a stored blob that fails to parse is an error.
pub fn load_tasks(store: &dyn KeyValueStore) -> Result<Vec<Task>, StoreError> {
    let raw = store.get(TASKS_KEY).map_err(|e| StoreError::ReadError {
        key: TASKS_KEY.to_string(),
        source: e,
    })?;
    match raw {
        None => Ok(seed_tasks()),
        Some(text) => serde_json::from_str(&text).map_err(|e| StoreError::ParseError {
            key: TASKS_KEY.to_string(),
            source: e,
        }),
    }
}

/// Persist the full task collection
pub fn save_tasks(store: &mut dyn KeyValueStore, tasks: &[Task]) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(tasks)?;
    store
        .set(TASKS_KEY, &content)
        .map_err(|e| StoreError::WriteError {
            key: TASKS_KEY.to_string(),
            source: e,
        })?;
    tracing::debug!(count = tasks.len(), "saved tasks");
    Ok(())
}

pub fn load_session(store: &dyn KeyValueStore) -> Result<Option<Session>, StoreError> {
    let raw = store.get(SESSION_KEY).map_err(|e| StoreError::ReadError {
        key: SESSION_KEY.to_string(),
        source: e,
    })?;
    raw.map(|text| {
        serde_json::from_str(&text).map_err(|e| StoreError::ParseError {
            key: SESSION_KEY.to_string(),
            source: e,
        })
    })
    .transpose()
}

pub fn save_session(store: &mut dyn KeyValueStore, session: &Session) -> Result<(), StoreError> {
    let content = serde_json::to_string(session)?;
    store
        .set(SESSION_KEY, &content)
        .map_err(|e| StoreError::WriteError {
            key: SESSION_KEY.to_string(),
            source: e,
        })
}

/// Remove the persisted session. The task collection is left alone.
pub fn clear_session(store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
    store
        .remove(SESSION_KEY)
        .map_err(|e| StoreError::WriteError {
            key: SESSION_KEY.to_string(),
            source: e,
        })
}

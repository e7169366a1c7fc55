use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// TUI view state persisted in `.syncrotask/.state.json` between runs
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UiState {
    /// Which tab is showing ("dashboard", "board", "analytics", "ai")
    pub view: String,
    /// Board cursor column (0 = To Do)
    #[serde(default)]
    pub column: usize,
    /// Board cursor row within the column
    #[serde(default)]
    pub row: usize,
    /// Search filter that was active on exit
    #[serde(default)]
    pub query: String,
}

/// Read .state.json from the data directory
pub fn read_ui_state(data_dir: &Path) -> Option<UiState> {
    let content = fs::read_to_string(data_dir.join(".state.json")).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the data directory
pub fn write_ui_state(data_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let content = serde_json::to_string_pretty(state)?;
    fs::write(data_dir.join(".state.json"), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let state = UiState {
            view: "analytics".into(),
            column: 2,
            row: 1,
            query: "budget".into(),
        };
        write_ui_state(dir.path(), &state).unwrap();
        assert_eq!(read_ui_state(dir.path()), Some(state));
    }

    #[test]
    fn read_missing_or_malformed_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_ui_state(dir.path()).is_none());
        fs::write(dir.path().join(".state.json"), "not json {{{").unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn serde_defaults_on_minimal_object() {
        let state: UiState = serde_json::from_str(r#"{"view":"board"}"#).unwrap();
        assert_eq!(state.view, "board");
        assert_eq!(state.column, 0);
        assert_eq!(state.row, 0);
        assert!(state.query.is_empty());
    }
}

use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::config_io;
use crate::io::kv::FileStore;
use crate::io::workspace_io::{self, DATA_DIR};
use crate::model::task::seed_tasks;

const CONFIG_TOML_TEMPLATE: &str = r##"# SyncroTask board configuration.
# Every setting is optional; the values shown are the defaults.

[auth]
# Pause before a sign-in attempt is answered
simulated_delay_ms = 800

[ai]
endpoint = "https://generativelanguage.googleapis.com/v1beta"
model = "gemini-3-flash-preview"
# Environment variable holding the API key (GEMINI_API_KEY is tried next)
api_key_env = "API_KEY"
# timeout_secs = 30

[board]
# Category choices offered by the task form
categories = ["Engineering", "Marketing", "Design", "Sales", "HR", "Admin"]

# --- UI Customization ---
# Uncomment and edit to override defaults.
#
# [ui.colors]
# background = "#0F172A"
# text = "#CBD5E1"
# text_bright = "#FFFFFF"
# highlight = "#818CF8"
# dim = "#64748B"
# red = "#F43F5E"
# yellow = "#F59E0B"
# green = "#10B981"
# blue = "#3B82F6"
"##;

pub fn cmd_init(args: InitArgs, cwd: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = cwd.join(DATA_DIR);

    // Check if already initialized
    if data_dir.is_dir() {
        return Err(format!("task board already exists in ./{}/", DATA_DIR).into());
    }

    // Check for parent board and warn
    if let Some(parent) = cwd.parent()
        && let Ok(parent_root) = workspace_io::discover_workspace(parent)
    {
        eprintln!(
            "Note: parent board found at {}/",
            parent_root.join(DATA_DIR).display()
        );
        eprintln!("Creating new board in ./{}/", DATA_DIR);
    }

    fs::create_dir_all(&data_dir)?;
    config_io::write_config_template(&data_dir, CONFIG_TOML_TEMPLATE)?;

    let tasks = if args.empty { Vec::new() } else { seed_tasks() };
    let mut store = FileStore::new(&data_dir);
    workspace_io::save_tasks(&mut store, &tasks)?;

    println!("Initialized task board in ./{}/", DATA_DIR);
    if !tasks.is_empty() {
        println!("  {} sample tasks", tasks.len());
    }
    println!("Sign in with: syncrotask login <employee-id>");
    Ok(())
}

mod init;
pub use init::cmd_init;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ai::Collaborator;
use crate::ai::gemini::GeminiClient;
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::lock::StoreLock;
use crate::io::workspace_io::{self, DATA_DIR, StoreError};
use crate::model::task::Task;
use crate::model::workspace::Workspace;
use crate::ops::analytics::BoardStats;
use crate::ops::draft::{self, SaveRequest, TaskDraft};
use crate::ops::task_ops::{self, Mutation};
use crate::ops::{auth, board};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let start = start_dir(cli.board_dir.as_deref())?;

    match cli.command {
        None => Err("no command given (try `syncrotask --help`)".into()),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(args, &start),

            // Session
            Commands::Login(args) => cmd_login(args, &start, json),
            Commands::Logout => cmd_logout(&start),
            Commands::Whoami => cmd_whoami(&start, json),

            // Read commands
            Commands::List(args) => cmd_list(args, &start, json),
            Commands::Show(args) => cmd_show(args, &start, json),
            Commands::Board(args) => cmd_board(args, &start, json),
            Commands::Stats(args) => cmd_stats(args, &start, json),

            // Write commands
            Commands::Add(args) => cmd_add(args, &start),
            Commands::Edit(args) => cmd_edit(args, &start),
            Commands::Delete(args) => cmd_delete(args, &start),
            Commands::Toggle(args) => cmd_toggle(args, &start, json),

            // AI
            Commands::Breakdown(args) => cmd_breakdown(args, &start, json),
            Commands::Advice => cmd_advice(&start, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Directory board discovery starts from: `-C` if given, else the cwd
pub fn start_dir(board_dir: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match board_dir {
        Some(dir) => Ok(std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?),
        None => Ok(std::env::current_dir()?),
    }
}

fn load_board(start: &Path) -> Result<Workspace, StoreError> {
    let root = workspace_io::discover_workspace(start)?;
    workspace_io::load_workspace(&root)
}

/// Load the board under the write lock, apply `change`, and persist the
/// collection if the change went through.
fn commit(
    start: &Path,
    change: impl FnOnce(&mut Workspace) -> Mutation,
) -> Result<(Workspace, Mutation), Box<dyn std::error::Error>> {
    let root = workspace_io::discover_workspace(start)?;
    let _lock = StoreLock::acquire_default(&root.join(DATA_DIR))?;
    let mut ws = workspace_io::load_workspace(&root)?;
    let result = change(&mut ws);
    if result.is_applied() {
        let mut store = workspace_io::file_store(&ws);
        workspace_io::save_tasks(&mut store, &ws.tasks)?;
    }
    Ok((ws, result))
}

/// Turn a rejected mutation into a command error. Cancelled is not an
/// error; it returns None.
fn applied_id(
    ws: &Workspace,
    result: Mutation,
    action: &str,
    task_id: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    match result {
        Mutation::Applied(id) => Ok(Some(id)),
        Mutation::Cancelled => Ok(None),
        Mutation::NotFound => Err(format!("task not found: {}", task_id).into()),
        Mutation::Denied => Err(denied_message(ws, action).into()),
    }
}

fn denied_message(ws: &Workspace, action: &str) -> String {
    match &ws.session {
        None => "not signed in (run `syncrotask login <id>`)".to_string(),
        Some(s) => format!(
            "{} requires TL access (signed in as {})",
            action,
            format_session(s)
        ),
    }
}

fn find_task<'a>(ws: &'a Workspace, id: &str) -> Result<&'a Task, String> {
    ws.find_task(id)
        .ok_or_else(|| format!("task not found: {}", id))
}

fn collaborator(ws: &Workspace) -> Result<GeminiClient, Box<dyn std::error::Error>> {
    Ok(GeminiClient::from_config(&ws.config.ai)?)
}

fn prompt_line(prompt: &str) -> std::io::Result<String> {
    eprint!("{}", prompt);
    std::io::stderr().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

// ---------------------------------------------------------------------------
// Session commands
// ---------------------------------------------------------------------------

fn cmd_login(args: LoginArgs, start: &Path, json: bool) -> CmdResult {
    let ws = load_board(start)?;
    let password = match args.password {
        Some(p) => p,
        None => prompt_line("Password: ")?,
    };
    let delay = Duration::from_millis(ws.config.auth.simulated_delay_ms);
    let session = auth::authenticate(&args.employee_id, &password, delay)?;

    let _lock = StoreLock::acquire_default(&ws.data_dir)?;
    let mut store = workspace_io::file_store(&ws);
    workspace_io::save_session(&mut store, &session)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else {
        println!("Signed in as {}", format_session(&session));
    }
    Ok(())
}

fn cmd_logout(start: &Path) -> CmdResult {
    let ws = load_board(start)?;
    let _lock = StoreLock::acquire_default(&ws.data_dir)?;
    let mut store = workspace_io::file_store(&ws);
    workspace_io::clear_session(&mut store)?;
    tracing::info!("signed out");
    println!("Signed out");
    Ok(())
}

fn cmd_whoami(start: &Path, json: bool) -> CmdResult {
    let ws = load_board(start)?;
    if json {
        let out = WhoamiJson {
            signed_in: ws.session.is_some(),
            session: ws.session.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        match &ws.session {
            Some(s) => println!("{}", format_session(s)),
            None => println!("not signed in"),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, start: &Path, json: bool) -> CmdResult {
    let ws = load_board(start)?;
    let status_filter = args.status.as_deref().map(parse_status).transpose()?;
    let query = args.query.unwrap_or_default();

    let filtered = task_ops::filter_tasks(&ws.tasks, &query);
    let tasks: Vec<&Task> = filtered
        .iter()
        .filter(|t| status_filter.is_none_or(|s| t.status == s))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        for task in tasks {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, start: &Path, json: bool) -> CmdResult {
    let ws = load_board(start)?;
    let task = find_task(&ws, &args.id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
    } else {
        for line in format_task_detail(task) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_board(args: QueryArgs, start: &Path, json: bool) -> CmdResult {
    let mut ws = load_board(start)?;
    ws.query = args.query.unwrap_or_default();
    let visible = task_ops::visible_tasks(&ws);
    let columns = board::partition(&visible);

    if json {
        let out: Vec<_> = columns.iter().map(column_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_board(&columns, ws.role()) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_stats(args: QueryArgs, start: &Path, json: bool) -> CmdResult {
    let mut ws = load_board(start)?;
    ws.query = args.query.unwrap_or_default();
    let stats = BoardStats::compute(&task_ops::visible_tasks(&ws));

    if json {
        println!("{}", serde_json::to_string_pretty(&stats_to_json(&stats))?);
    } else {
        for line in format_stats(&stats) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

/// Fill the draft's sub-tasks from the AI. Runs before the write lock is
/// taken; the request can take a while.
fn apply_ai_breakdown(ws: &Workspace, draft: &mut TaskDraft) -> CmdResult {
    if !draft.can_breakdown() {
        return Err("--breakdown needs both a title and a description".into());
    }
    let ai = collaborator(ws)?;
    draft.apply_breakdown(ai.breakdown(&draft.title, &draft.description));
    Ok(())
}

fn cmd_add(args: AddArgs, start: &Path) -> CmdResult {
    let ws = load_board(start)?;
    if !ws.is_elevated() {
        return Err(denied_message(&ws, "add").into());
    }

    let mut form = TaskDraft::new(&ws.config.board.categories, &draft::today());
    form.title = args.title;
    form.description = args.description;
    if let Some(p) = args.priority.as_deref() {
        form.priority = parse_priority(p)?;
    }
    if let Some(s) = args.status.as_deref() {
        form.status = parse_status(s)?;
    }
    if let Some(c) = args.category {
        form.category = c;
    }
    if let Some(d) = args.due {
        form.due_date = d;
    }
    form.sub_tasks = args.subtasks;
    if args.breakdown {
        apply_ai_breakdown(&ws, &mut form)?;
    }

    let SaveRequest::Create(fields) = form.into_save() else {
        return Err("internal: new task draft produced an update".into());
    };
    let (ws, result) = commit(start, |ws| task_ops::create_task(ws, fields))?;
    if let Some(id) = applied_id(&ws, result, "add", "")? {
        println!("{}", id);
    }
    Ok(())
}

fn cmd_edit(args: EditArgs, start: &Path) -> CmdResult {
    let ws = load_board(start)?;
    if !ws.is_elevated() {
        return Err(denied_message(&ws, "edit").into());
    }

    let mut form = TaskDraft::from_task(find_task(&ws, &args.id)?);
    if let Some(t) = args.title {
        form.title = t;
    }
    if let Some(d) = args.description {
        form.description = d;
    }
    if let Some(p) = args.priority.as_deref() {
        form.priority = parse_priority(p)?;
    }
    if let Some(s) = args.status.as_deref() {
        form.status = parse_status(s)?;
    }
    if let Some(c) = args.category {
        form.category = c;
    }
    if let Some(d) = args.due {
        form.due_date = d;
    }
    if args.clear_subtasks {
        form.sub_tasks.clear();
    } else if !args.subtasks.is_empty() {
        form.sub_tasks = args.subtasks;
    }
    if args.breakdown {
        apply_ai_breakdown(&ws, &mut form)?;
    }

    let SaveRequest::Update(task) = form.into_save() else {
        return Err("internal: edit draft produced a create".into());
    };
    let (ws, result) = commit(start, |ws| task_ops::update_task(ws, task))?;
    if let Some(id) = applied_id(&ws, result, "edit", &args.id)? {
        println!("{}", id);
    }
    Ok(())
}

/// Confirm first, then delete under the lock. The prompt runs with the board
/// unlocked so a TUI save is not left waiting on stdin.
fn cmd_delete(args: DeleteArgs, start: &Path) -> CmdResult {
    let ws = load_board(start)?;
    if !ws.is_elevated() {
        return Err(denied_message(&ws, "delete").into());
    }
    let title = find_task(&ws, &args.id)?.title.clone();
    if !args.yes {
        let answer = prompt_line(&format!("Delete '{}'? [y/n] ", title))?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("cancelled");
            return Ok(());
        }
    }

    let (ws, result) = commit(start, |ws| task_ops::delete_task(ws, &args.id, |_| true))?;
    if let Some(id) = applied_id(&ws, result, "delete", &args.id)? {
        println!("deleted {}", id);
    }
    Ok(())
}

fn cmd_toggle(args: ToggleArgs, start: &Path, json: bool) -> CmdResult {
    let (ws, result) = commit(start, |ws| task_ops::toggle_status(ws, &args.id))?;
    if let Some(id) = applied_id(&ws, result, "toggle", &args.id)? {
        let task = find_task(&ws, &id)?;
        if json {
            println!("{}", serde_json::to_string_pretty(task)?);
        } else {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// AI commands
// ---------------------------------------------------------------------------

fn cmd_breakdown(args: BreakdownArgs, start: &Path, json: bool) -> CmdResult {
    let ws = load_board(start)?;
    let ai = collaborator(&ws)?;
    let items = ai.breakdown(&args.title, &args.description);
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for item in &items {
            println!("- {}", item);
        }
    }
    Ok(())
}

fn cmd_advice(start: &Path, json: bool) -> CmdResult {
    let ws = load_board(start)?;
    let ai = collaborator(&ws)?;
    let advice = ai.advice(&ws.tasks);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&AdviceJson { advice: &advice })?
        );
    } else {
        println!("{}", advice);
    }
    Ok(())
}

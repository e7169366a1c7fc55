use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "syncrotask", about = concat!("syncrotask v", env!("CARGO_PKG_VERSION"), " - a role-gated team task board"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different board directory
    #[arg(short = 'C', long = "board-dir", global = true)]
    pub board_dir: Option<String>,

    /// Log level for stderr output (overridden by SYNCROTASK_LOG)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new task board in the current directory
    Init(InitArgs),
    /// Sign in with an employee ID
    Login(LoginArgs),
    /// Sign out (tasks are kept)
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List tasks
    List(ListArgs),
    /// Show task details
    Show(ShowArgs),
    /// Show tasks grouped into status columns
    Board(QueryArgs),
    /// Show completion and priority statistics
    Stats(QueryArgs),
    /// Create a task (team lead only)
    Add(AddArgs),
    /// Change a task's fields (team lead only)
    Edit(EditArgs),
    /// Delete a task (team lead only)
    Delete(DeleteArgs),
    /// Flip a task between done and to do
    Toggle(ToggleArgs),
    /// Ask the AI for a sub-task breakdown
    Breakdown(BreakdownArgs),
    /// Ask the AI for productivity tips on the current tasks
    Advice,
}

// ---------------------------------------------------------------------------
// Session args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Start with no tasks instead of the sample board
    #[arg(long)]
    pub empty: bool,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Employee ID (e.g. TL1001)
    pub employee_id: String,
    /// Password (read from stdin when omitted)
    #[arg(long, short)]
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Only tasks whose title, description or category contain this text
    #[arg(long, short)]
    pub query: Option<String>,
    /// Filter by status (todo, in-progress, done)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task ID to show
    pub id: String,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Only tasks whose title, description or category contain this text
    #[arg(long, short)]
    pub query: Option<String>,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    #[arg(long, short, default_value = "")]
    pub description: String,
    /// low, medium or high (default: medium)
    #[arg(long)]
    pub priority: Option<String>,
    /// Category (default: first configured category)
    #[arg(long)]
    pub category: Option<String>,
    /// Due date, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub due: Option<String>,
    /// todo, in-progress or done (default: todo)
    #[arg(long)]
    pub status: Option<String>,
    /// Sub-task (repeatable)
    #[arg(long = "subtask")]
    pub subtasks: Vec<String>,
    /// Fill sub-tasks from an AI breakdown of title and description
    #[arg(long, conflicts_with = "subtasks")]
    pub breakdown: bool,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID to edit
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, short)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub due: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// Replace sub-tasks (repeatable)
    #[arg(long = "subtask")]
    pub subtasks: Vec<String>,
    /// Remove all sub-tasks
    #[arg(long, conflicts_with_all = ["subtasks", "breakdown"])]
    pub clear_subtasks: bool,
    /// Replace sub-tasks with an AI breakdown
    #[arg(long, conflicts_with = "subtasks")]
    pub breakdown: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task ID to delete
    pub id: String,
    /// Skip confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Task ID to toggle
    pub id: String,
}

// ---------------------------------------------------------------------------
// AI args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct BreakdownArgs {
    /// Task title
    pub title: String,
    /// Task description
    pub description: String,
}

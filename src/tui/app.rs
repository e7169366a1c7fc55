use std::borrow::Cow;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::ai::Collaborator;
use crate::ai::gemini::GeminiClient;
use crate::cli::handlers;
use crate::io::lock::StoreLock;
use crate::io::log;
use crate::io::workspace_io;
use crate::model::session::{Role, Session};
use crate::model::task::Task;
use crate::model::workspace::Workspace;
use crate::ops::advisor::{AdvisorPanel, RequestTracker};
use crate::ops::auth::AuthState;
use crate::ops::board;
use crate::ops::draft::{self, SaveRequest, TaskDraft};
use crate::ops::task_ops::{self, Mutation};

use super::field::TextField;
use super::input;
use super::render;
use super::theme::Theme;
use super::worker::{Worker, WorkerEvent};

/// Which tab is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Board,
    Analytics,
    Advisor,
}

impl View {
    /// Tab order
    pub const ALL: [View; 4] = [View::Dashboard, View::Board, View::Analytics, View::Advisor];

    pub fn label(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Board => "Board",
            View::Analytics => "Analytics",
            View::Advisor => "AI Assistant",
        }
    }

    /// Name stored in `.state.json`
    pub fn key(self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Board => "board",
            View::Analytics => "analytics",
            View::Advisor => "ai",
        }
    }

    pub fn from_key(key: &str) -> Option<View> {
        View::ALL.into_iter().find(|v| v.key() == key)
    }

    fn index(self) -> usize {
        View::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn next(self) -> View {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    pub fn prev(self) -> View {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Sign-in screen; nothing else is reachable
    Login,
    Navigate,
    Search,
    /// Task form popup
    Form,
    /// Delete confirmation popup
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    EmployeeId,
    Password,
}

/// Sign-in screen state
#[derive(Debug, Default)]
pub struct LoginForm {
    pub employee_id: TextField,
    pub password: TextField,
    pub focus: LoginField,
    pub auth: AuthState,
}

impl LoginForm {
    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            LoginField::EmployeeId => &mut self.employee_id,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::EmployeeId => LoginField::Password,
            LoginField::Password => LoginField::EmployeeId,
        };
    }
}

/// Rows of the task form, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Status,
    Priority,
    Category,
    DueDate,
    SubTasks,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Title,
        FormField::Description,
        FormField::Status,
        FormField::Priority,
        FormField::Category,
        FormField::DueDate,
        FormField::SubTasks,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Status => "Status",
            FormField::Priority => "Priority",
            FormField::Category => "Category",
            FormField::DueDate => "Due Date",
            FormField::SubTasks => "AI Checklist Breakdown",
        }
    }

    /// Fields changed with ←/→ rather than typed into
    pub fn is_choice(self) -> bool {
        matches!(
            self,
            FormField::Status | FormField::Priority | FormField::Category
        )
    }

    fn index(self) -> usize {
        FormField::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> FormField {
        FormField::ALL[(self.index() + 1) % FormField::ALL.len()]
    }

    pub fn prev(self) -> FormField {
        FormField::ALL[(self.index() + FormField::ALL.len() - 1) % FormField::ALL.len()]
    }
}

/// The open task form: a draft plus the text inputs that feed it
#[derive(Debug)]
pub struct FormState {
    pub draft: TaskDraft,
    pub focus: FormField,
    pub title: TextField,
    pub description: TextField,
    pub due_date: TextField,
    /// Input for adding a checklist item by hand
    pub new_subtask: TextField,
    /// A breakdown request is in flight
    pub generating: bool,
    pub error: Option<String>,
}

impl FormState {
    pub fn new(draft: TaskDraft) -> Self {
        FormState {
            title: TextField::with_text(&draft.title),
            description: TextField::with_text(&draft.description),
            due_date: TextField::with_text(&draft.due_date),
            new_subtask: TextField::new(),
            draft,
            focus: FormField::Title,
            generating: false,
            error: None,
        }
    }

    /// Copy the text inputs into the draft
    pub fn sync(&mut self) {
        self.draft.title = self.title.text().to_string();
        self.draft.description = self.description.text().to_string();
        self.draft.due_date = self.due_date.text().to_string();
    }

    /// The text input under focus, if the focused row is typed into
    pub fn focused_text_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::SubTasks => Some(&mut self.new_subtask),
            _ => None,
        }
    }

    pub fn breakdown_enabled(&self) -> bool {
        !self.generating
            && !self.title.text().trim().is_empty()
            && !self.description.text().trim().is_empty()
    }
}

/// Pending delete confirmation
#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub task_id: String,
    pub title: String,
}

/// Main application state
pub struct App {
    pub workspace: Workspace,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Board cursor column (0 = To Do)
    pub column: usize,
    /// Board cursor row within the column
    pub row: usize,
    pub login: LoginForm,
    /// Search input; its text mirrors `workspace.query`
    pub search: TextField,
    pub form: Option<FormState>,
    pub confirm: Option<ConfirmState>,
    pub advisor: AdvisorPanel,
    login_requests: RequestTracker,
    breakdown_requests: RequestTracker,
    /// One-line feedback shown in the status row until the next key
    pub status_message: Option<String>,
    worker: Worker,
}

impl App {
    pub fn new(workspace: Workspace, ai: Arc<dyn Collaborator>) -> Self {
        let theme = Theme::from_config(&workspace.config.ui);
        let delay = Duration::from_millis(workspace.config.auth.simulated_delay_ms);
        let mode = if workspace.session.is_some() {
            Mode::Navigate
        } else {
            Mode::Login
        };
        App {
            workspace,
            view: View::Board,
            mode,
            should_quit: false,
            theme,
            column: 0,
            row: 0,
            login: LoginForm::default(),
            search: TextField::new(),
            form: None,
            confirm: None,
            advisor: AdvisorPanel::new(),
            login_requests: RequestTracker::default(),
            breakdown_requests: RequestTracker::default(),
            status_message: None,
            worker: Worker::new(ai, delay),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.workspace.session.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.workspace.role()
    }

    pub fn is_elevated(&self) -> bool {
        self.workspace.is_elevated()
    }

    /// Tasks under the current search filter
    pub fn visible_tasks(&self) -> Cow<'_, [Task]> {
        task_ops::visible_tasks(&self.workspace)
    }

    /// The card under the board cursor
    pub fn selected_task(&self) -> Option<Task> {
        let tasks = self.visible_tasks();
        let columns = board::partition(&tasks);
        columns
            .get(self.column)
            .and_then(|c| c.tasks.get(self.row))
            .map(|t| (*t).clone())
    }

    /// Keep the cursor inside the current column after the collection or
    /// the filter changes
    pub fn clamp_cursor(&mut self) {
        self.column = self.column.min(board::COLUMN_COUNT - 1);
        let len = {
            let tasks = self.visible_tasks();
            board::partition(&tasks)[self.column].len()
        };
        self.row = self.row.min(len.saturating_sub(1));
    }

    /// Put the cursor on the card with `task_id`, wherever it lives now
    fn focus_task(&mut self, task_id: &str) {
        let found = {
            let tasks = self.visible_tasks();
            tasks.iter().find(|t| t.id == task_id).map(|task| {
                let column = board::column_index(task.status);
                let row = tasks
                    .iter()
                    .filter(|t| t.status == task.status)
                    .position(|t| t.id == task_id)
                    .unwrap_or(0);
                (column, row)
            })
        };
        if let Some((column, row)) = found {
            self.column = column;
            self.row = row;
        } else {
            self.clamp_cursor();
        }
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// Switch tabs. Selecting the tab already shown does nothing.
    pub fn set_view(&mut self, view: View) {
        if view == self.view {
            return;
        }
        if self.view == View::Advisor {
            self.advisor.reset();
        }
        self.view = view;
        self.enter_view();
    }

    /// Run the on-entry work of the current view: the assistant asks for
    /// fresh advice whenever there are tasks.
    fn enter_view(&mut self) {
        if self.view != View::Advisor || self.workspace.session.is_none() {
            return;
        }
        let tasks = &self.workspace.tasks;
        if let Some(ticket) = self.advisor.on_open(tasks) {
            self.worker.advice(ticket, tasks.clone());
        }
    }

    pub fn refresh_advice(&mut self) {
        let ticket = self.advisor.refresh();
        self.worker.advice(ticket, self.workspace.tasks.clone());
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    /// Send the login form off for checking. Ignored while a check is pending.
    pub fn submit_login(&mut self) {
        if !self.login.auth.submit() {
            return;
        }
        let ticket = self.login_requests.issue();
        self.worker.login(
            ticket,
            self.login.employee_id.text().trim().to_string(),
            self.login.password.text().to_string(),
        );
    }

    fn sign_in(&mut self, session: Session) {
        let mut store = workspace_io::file_store(&self.workspace);
        if let Err(e) = workspace_io::save_session(&mut store, &session) {
            tracing::error!(error = %e, "could not persist session");
            self.status_message = Some(format!("session not saved: {}", e));
        }
        self.workspace.session = Some(session);
        self.login = LoginForm::default();
        self.mode = Mode::Navigate;
        self.clamp_cursor();
        self.enter_view();
    }

    /// Drop the session and return to the sign-in screen. Tasks stay.
    pub fn sign_out(&mut self) {
        let mut store = workspace_io::file_store(&self.workspace);
        if let Err(e) = workspace_io::clear_session(&mut store) {
            tracing::error!(error = %e, "could not clear session");
        }
        if let Some(s) = self.workspace.session.take() {
            tracing::info!(employee = %s.employee_id, "signed out");
        }
        self.form = None;
        self.confirm = None;
        self.advisor.reset();
        self.breakdown_requests.cancel();
        self.login = LoginForm::default();
        self.status_message = None;
        self.mode = Mode::Login;
    }

    // -----------------------------------------------------------------------
    // Task form
    // -----------------------------------------------------------------------

    pub fn open_new_form(&mut self) {
        if !self.is_elevated() {
            self.status_message = Some("creating tasks requires TL access".into());
            return;
        }
        let draft = TaskDraft::new(&self.workspace.config.board.categories, &draft::today());
        self.form = Some(FormState::new(draft));
        self.mode = Mode::Form;
    }

    pub fn open_edit_form(&mut self) {
        if !self.is_elevated() {
            self.status_message = Some("editing tasks requires TL access".into());
            return;
        }
        let Some(task) = self.selected_task() else {
            return;
        };
        self.form = Some(FormState::new(TaskDraft::from_task(&task)));
        self.mode = Mode::Form;
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.breakdown_requests.cancel();
        self.mode = Mode::Navigate;
    }

    /// Ask for a checklist for the form's title and description
    pub fn request_breakdown(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        if !form.breakdown_enabled() {
            return;
        }
        form.sync();
        form.generating = true;
        let ticket = self.breakdown_requests.issue();
        self.worker.breakdown(
            ticket,
            form.draft.title.clone(),
            form.draft.description.clone(),
        );
    }

    /// Save the form. Stays open with an error when the title is blank.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        form.sync();
        if !form.draft.can_submit() {
            form.error = Some("Title is required".into());
            form.focus = FormField::Title;
            return;
        }
        let Some(form) = self.form.take() else {
            return;
        };
        self.breakdown_requests.cancel();
        self.mode = Mode::Navigate;
        self.commit(|ws| match form.draft.into_save() {
            SaveRequest::Create(fields) => task_ops::create_task(ws, fields),
            SaveRequest::Update(task) => task_ops::update_task(ws, task),
        });
    }

    // -----------------------------------------------------------------------
    // Board actions
    // -----------------------------------------------------------------------

    pub fn toggle_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        self.commit(|ws| task_ops::toggle_status(ws, &task.id));
    }

    /// Open the delete confirmation for the selected card (TL only)
    pub fn request_delete(&mut self) {
        if !self.is_elevated() {
            self.status_message = Some("deleting tasks requires TL access".into());
            return;
        }
        let Some(task) = self.selected_task() else {
            return;
        };
        self.confirm = Some(ConfirmState {
            task_id: task.id,
            title: task.title,
        });
        self.mode = Mode::Confirm;
    }

    /// Answer the pending confirmation
    pub fn resolve_delete(&mut self, confirmed: bool) {
        self.mode = Mode::Navigate;
        let Some(state) = self.confirm.take() else {
            return;
        };
        self.commit(|ws| task_ops::delete_task(ws, &state.task_id, |_| confirmed));
    }

    /// Apply `change` to the stored collection and keep the result.
    ///
    /// Under the store lock the blob is re-read first, so writes made by
    /// other processes since the last load survive; the collection is only
    /// written back when the change applied.
    fn commit(&mut self, change: impl FnOnce(&mut Workspace) -> Mutation) {
        match self.try_commit(change) {
            Ok(result) => self.report(result),
            Err(e) => {
                tracing::error!(error = %e, "could not save tasks");
                self.status_message = Some(format!("save failed: {}", e));
                self.clamp_cursor();
            }
        }
    }

    fn try_commit(
        &mut self,
        change: impl FnOnce(&mut Workspace) -> Mutation,
    ) -> Result<Mutation, Box<dyn std::error::Error>> {
        let _lock = StoreLock::acquire_default(&self.workspace.data_dir)?;
        let mut store = workspace_io::file_store(&self.workspace);
        self.workspace.tasks = workspace_io::load_tasks(&store)?;
        let result = change(&mut self.workspace);
        if result.is_applied() {
            workspace_io::save_tasks(&mut store, &self.workspace.tasks)?;
        }
        Ok(result)
    }

    /// Move the cursor after an applied mutation; explain the rest
    fn report(&mut self, result: Mutation) {
        match result {
            Mutation::Applied(id) => self.focus_task(&id),
            Mutation::Denied => {
                self.status_message = Some("not allowed for your role".into());
                self.clamp_cursor();
            }
            Mutation::NotFound => {
                self.status_message = Some("task no longer exists".into());
                self.clamp_cursor();
            }
            Mutation::Cancelled => self.clamp_cursor(),
        }
    }

    // -----------------------------------------------------------------------
    // Worker results
    // -----------------------------------------------------------------------

    /// Drain finished background work into the UI state
    pub fn poll_worker(&mut self) {
        for event in self.worker.poll() {
            self.handle_worker_event(event);
        }
    }

    pub fn handle_worker_event(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::LoginDone { ticket, result } => {
                if !self.login_requests.is_current(ticket) || self.mode != Mode::Login {
                    return;
                }
                self.login.auth.resolve(result);
                if let AuthState::Authenticated(session) = &self.login.auth {
                    let session = session.clone();
                    self.sign_in(session);
                }
            }
            WorkerEvent::BreakdownDone { ticket, items } => {
                if !self.breakdown_requests.is_current(ticket) {
                    return;
                }
                if let Some(form) = self.form.as_mut() {
                    form.draft.apply_breakdown(items);
                    form.generating = false;
                }
            }
            WorkerEvent::AdviceDone { ticket, advice } => {
                self.advisor.complete(ticket, advice);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn worker(&self) -> &Worker {
        &self.worker
    }
}

/// Restore UI state from .state.json
pub fn restore_ui_state(app: &mut App) {
    use crate::io::state::read_ui_state;

    let Some(ui_state) = read_ui_state(&app.workspace.data_dir) else {
        return;
    };

    if let Some(view) = View::from_key(&ui_state.view) {
        app.view = view;
    }
    app.workspace.query = ui_state.query.clone();
    app.search = TextField::with_text(&ui_state.query);
    app.column = ui_state.column;
    app.row = ui_state.row;
    app.clamp_cursor();
}

/// Save UI state to .state.json
pub fn save_ui_state(app: &App) {
    use crate::io::state::{UiState, write_ui_state};

    let ui_state = UiState {
        view: app.view.key().to_string(),
        column: app.column,
        row: app.row,
        query: app.workspace.query.clone(),
    };

    if let Err(e) = write_ui_state(&app.workspace.data_dir, &ui_state) {
        tracing::debug!(error = %e, "could not save UI state");
    }
}

fn load(board_dir: Option<&str>) -> Result<Workspace, Box<dyn std::error::Error>> {
    let start = handlers::start_dir(board_dir)?;
    let root = workspace_io::discover_workspace(&start)?;
    Ok(workspace_io::load_workspace(&root)?)
}

/// Run the TUI application
pub fn run(board_dir: Option<&str>, log_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = load(board_dir)?;
    log::init_file(&workspace.data_dir, log_level)?;
    let ai: Arc<dyn Collaborator> = Arc::new(GeminiClient::from_config(&workspace.config.ai)?);
    tracing::info!(root = %workspace.root.display(), "starting TUI");

    let mut app = App::new(workspace, ai);

    // Restore saved UI state
    restore_ui_state(&mut app);
    app.enter_view();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Save UI state before exit
    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        app.poll_worker();
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
            // Debounced state save: every ~5 key presses
            save_counter += 1;
            if save_counter >= 5 {
                save_ui_state(app);
                save_counter = 0;
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

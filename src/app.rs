//! Application shell: terminal lifecycle, screen routing, and the event
//! loop.
//!
//! The loop owns every piece of mutable state — both stores, the forms, the
//! board — and consumes a single channel fed from two sides: a blocking
//! thread forwarding crossterm input, and spawned tokio tasks reporting API
//! results. Requests never block rendering, and because only this loop
//! applies store actions there is exactly one writer. There is no
//! cross-request ordering, cancellation, or timeout: the last response to
//! arrive wins, matching the web client this replaces.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::api::models::{SessionUser, Task, TaskDraft};
use crate::auth::{LoginForm, SignupForm};
use crate::board::{self, BoardMode, BoardState, EditForm};
use crate::errors::ApiError;
use crate::store::actions::{AuthAction, TaskAction};
use crate::store::{AuthStore, TaskStore};
use crate::ui::icons::{CHECK, CROSS, TASKS, WAVE};
use crate::ui::{ToastKind, Toasts};

/// One-time banner shown on first board entry, kept from the web shell.
const WELCOME_MESSAGE: &str = "Welcome to Task Manager! Start organizing your day, \
     tracking your progress, and achieving your goals with ease.";

/// Redraw cadence while idle; also drives toast expiry.
const TICK: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Signup,
    Board,
}

/// Everything the event loop can wake up on.
#[derive(Debug)]
pub enum AppEvent {
    Input(Event),
    Api(ApiEvent),
}

/// Completed API calls, one variant per operation.
#[derive(Debug)]
pub enum ApiEvent {
    LoggedIn(Result<SessionUser, ApiError>),
    SignedUp(Result<SessionUser, ApiError>),
    LoggedOut(Result<(), ApiError>),
    TasksFetched(Result<Vec<Task>, ApiError>),
    TaskCreated(Result<Task, ApiError>),
    TaskUpdated(Result<Task, ApiError>),
    TaskDeleted {
        id: String,
        result: Result<(), ApiError>,
    },
}

impl ApiEvent {
    /// The uniform session-expiry check: a 401 from *any* operation is
    /// handled identically, before per-operation logic runs.
    fn unauthorized(&self) -> bool {
        let err = match self {
            Self::LoggedIn(Err(e)) | Self::SignedUp(Err(e)) => e,
            Self::LoggedOut(Err(e)) => e,
            Self::TasksFetched(Err(e)) => e,
            Self::TaskCreated(Err(e)) | Self::TaskUpdated(Err(e)) => e,
            Self::TaskDeleted {
                result: Err(e), ..
            } => e,
            _ => return false,
        };
        err.is_unauthorized()
    }
}

pub struct App {
    client: Arc<ApiClient>,
    tx: mpsc::Sender<AppEvent>,
    pub auth: AuthStore,
    pub tasks: TaskStore,
    pub screen: Screen,
    pub login: LoginForm,
    pub signup: SignupForm,
    pub board: BoardState,
    pub toasts: Toasts,
    welcome_visible: bool,
    welcome_seen: bool,
    should_quit: bool,
}

impl App {
    pub fn new(client: ApiClient, tx: mpsc::Sender<AppEvent>) -> Self {
        Self {
            client: Arc::new(client),
            tx,
            auth: AuthStore::default(),
            tasks: TaskStore::default(),
            screen: Screen::Login,
            login: LoginForm::default(),
            signup: SignupForm::default(),
            board: BoardState::default(),
            toasts: Toasts::default(),
            welcome_visible: false,
            welcome_seen: false,
            should_quit: false,
        }
    }

    /// Run until the user quits. Takes over the terminal for the duration.
    pub async fn run(mut self, mut rx: mpsc::Receiver<AppEvent>) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let _guard = TerminalGuard;
        self.spawn_input_forwarder();

        loop {
            self.toasts.prune();
            terminal.draw(|frame| self.draw(frame))?;

            match tokio::time::timeout(TICK, rx.recv()).await {
                Ok(Some(event)) => self.handle_event(event),
                Ok(None) => break,
                Err(_) => {} // tick: fall through to prune + redraw
            }
            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Forward blocking crossterm reads into the event channel.
    fn spawn_input_forwarder(&self) {
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            loop {
                match crossterm::event::read() {
                    Ok(event) => {
                        if tx.blocking_send(AppEvent::Input(event)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                self.on_key(key);
            }
            AppEvent::Input(_) => {} // resize redraws on the next pass
            AppEvent::Api(api) => self.on_api(api),
        }
    }

    // ── Input handling ───────────────────────────────────────────────

    fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.screen {
            Screen::Login => self.on_login_key(key),
            Screen::Signup => self.on_signup_key(key),
            Screen::Board => self.on_board_key(key),
        }
    }

    fn on_login_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.screen = Screen::Signup;
            return;
        }
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.login.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.login.focus_prev(),
            KeyCode::Backspace => self.login.backspace(),
            KeyCode::Enter => {
                // Validation gates the network call; inline errors were set
                // by validate() and nothing is sent.
                if !self.login.submitting && self.login.validate() {
                    self.login.submitting = true;
                    self.spawn_login(self.login.to_request());
                }
            }
            KeyCode::Char(c) => self.login.insert(c),
            _ => {}
        }
    }

    fn on_signup_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.screen = Screen::Login;
            return;
        }
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.signup.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.signup.focus_prev(),
            KeyCode::Backspace => self.signup.backspace(),
            KeyCode::Enter => {
                if !self.signup.submitting && self.signup.validate() {
                    self.signup.submitting = true;
                    self.spawn_signup(self.signup.to_request());
                }
            }
            KeyCode::Char(c) => self.signup.insert(c),
            _ => {}
        }
    }

    fn on_board_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('d') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.spawn_logout();
            return;
        }
        match &self.board.mode {
            BoardMode::Normal => self.on_board_normal_key(key),
            BoardMode::Search => self.on_search_key(key),
            BoardMode::View { .. } => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                    self.board.mode = BoardMode::Normal;
                }
            }
            BoardMode::Edit(_) => self.on_edit_key(key),
            BoardMode::ConfirmDelete { .. } => self.on_confirm_delete_key(key),
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.board.search.clear();
                self.board.mode = BoardMode::Normal;
            }
            KeyCode::Enter => self.board.mode = BoardMode::Normal,
            KeyCode::Backspace => {
                self.board.search.pop();
            }
            KeyCode::Char(c) => self.board.search.push(c),
            _ => return,
        }
        self.board.clamp_selection(&self.tasks);
    }

    fn on_edit_key(&mut self, key: KeyEvent) {
        let BoardMode::Edit(form) = &mut self.board.mode else {
            return;
        };
        match key.code {
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Left | KeyCode::Right => form.cycle(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => form.insert(c),
            KeyCode::Esc => self.board.mode = BoardMode::Normal,
            KeyCode::Enter => {
                if let Some(task) = form.to_task() {
                    self.board.mode = BoardMode::Normal;
                    self.spawn_update(task);
                }
            }
            _ => {}
        }
    }

    fn on_confirm_delete_key(&mut self, key: KeyEvent) {
        let BoardMode::ConfirmDelete { task_id, .. } = &self.board.mode else {
            return;
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let id = task_id.clone();
                self.board.mode = BoardMode::Normal;
                self.spawn_delete(id);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.board.mode = BoardMode::Normal;
            }
            _ => {}
        }
    }

    fn on_board_normal_key(&mut self, key: KeyEvent) {
        if self.welcome_visible && key.code == KeyCode::Char('x') {
            self.welcome_visible = false;
            return;
        }
        // While loading, and after a fatal fetch error, the board is inert
        // except for leaving it.
        if self.board.loading || self.board.error.is_some() {
            if key.code == KeyCode::Char('q') {
                self.should_quit = true;
            }
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => {
                self.board.select_column(-1);
                self.board.clamp_selection(&self.tasks);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.board.select_column(1);
                self.board.clamp_selection(&self.tasks);
            }
            KeyCode::Up | KeyCode::Char('k') => self.board.select_row(-1, &self.tasks),
            KeyCode::Down | KeyCode::Char('j') => self.board.select_row(1, &self.tasks),
            KeyCode::Char('H') => self.move_selected(-1),
            KeyCode::Char('L') => self.move_selected(1),
            KeyCode::Char('a') => {
                let draft = board::default_draft(chrono::Local::now().date_naive());
                self.spawn_create(draft);
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.board.selected_task(&self.tasks) {
                    self.board.mode = BoardMode::Edit(EditForm::from_task(task));
                }
            }
            KeyCode::Char('d') => {
                if let Some(task) = self.board.selected_task(&self.tasks) {
                    self.board.mode = BoardMode::ConfirmDelete {
                        task_id: task.id.clone(),
                        title: task.title.clone(),
                    };
                }
            }
            KeyCode::Enter | KeyCode::Char('v') => {
                if let Some(task) = self.board.selected_task(&self.tasks) {
                    self.board.mode = BoardMode::View {
                        task_id: task.id.clone(),
                    };
                }
            }
            KeyCode::Char('/') => self.board.mode = BoardMode::Search,
            _ => {}
        }
    }

    /// The record a move of the selected card would send, if the drop lands
    /// in a different column that exists.
    fn pending_move(&self, delta: isize) -> Option<Task> {
        let task = self.board.selected_task(&self.tasks)?;
        let destination = self.board.move_destination(delta)?;
        board::reclassify(task, destination)
    }

    /// The keyboard rendition of dropping the selected card one column over:
    /// recompute status from the destination, send one PUT. A drop in the
    /// source column sends nothing, and ordering within a column is never
    /// persisted.
    fn move_selected(&mut self, delta: isize) {
        if let Some(moved) = self.pending_move(delta) {
            self.spawn_update(moved);
        }
    }

    // ── API results ──────────────────────────────────────────────────

    fn on_api(&mut self, event: ApiEvent) {
        if event.unauthorized() {
            self.force_logout();
            return;
        }
        match event {
            ApiEvent::LoggedIn(result) => {
                self.login.submitting = false;
                match result {
                    Ok(user) => {
                        self.auth.apply(AuthAction::SetCredentials(user));
                        self.toasts.success("Login successful");
                        self.enter_board();
                    }
                    Err(err) => self.toasts.error(err.to_string()),
                }
            }
            ApiEvent::SignedUp(result) => {
                self.signup.submitting = false;
                match result {
                    Ok(user) => {
                        self.auth.apply(AuthAction::SetCredentials(user));
                        self.toasts.success("Signup successful");
                        self.enter_board();
                    }
                    Err(err) => self.toasts.error(err.to_string()),
                }
            }
            ApiEvent::LoggedOut(result) => match result {
                Ok(()) => {
                    self.clear_session();
                    self.toasts.success("Logout successful");
                }
                Err(err) => self.toasts.error(err.to_string()),
            },
            ApiEvent::TasksFetched(result) => {
                self.board.loading = false;
                match result {
                    Ok(tasks) => {
                        self.tasks.apply(TaskAction::Set(tasks));
                        self.board.clamp_selection(&self.tasks);
                    }
                    Err(err) => self.board.error = Some(err.to_string()),
                }
            }
            ApiEvent::TaskCreated(result) => match result {
                Ok(task) => {
                    self.tasks.apply(TaskAction::Add(task));
                    self.board.clamp_selection(&self.tasks);
                }
                Err(err) => self.toasts.error(err.to_string()),
            },
            ApiEvent::TaskUpdated(result) => match result {
                Ok(task) => {
                    self.tasks.apply(TaskAction::Update(task));
                    self.board.clamp_selection(&self.tasks);
                }
                Err(err) => self.toasts.error(err.to_string()),
            },
            ApiEvent::TaskDeleted { id, result } => match result {
                Ok(()) => {
                    self.tasks.apply(TaskAction::Remove(id));
                    self.board.clamp_selection(&self.tasks);
                }
                Err(err) => self.toasts.error(err.to_string()),
            },
        }
    }

    fn enter_board(&mut self) {
        self.screen = Screen::Board;
        self.board.reset();
        if !self.welcome_seen {
            self.welcome_seen = true;
            self.welcome_visible = true;
        }
        self.spawn_fetch();
    }

    fn clear_session(&mut self) {
        self.auth.apply(AuthAction::ClearSession);
        self.login = LoginForm::default();
        self.signup = SignupForm::default();
        self.board.reset();
        self.welcome_visible = false;
        self.screen = Screen::Login;
    }

    /// Uniform 401 policy: whatever the operation, drop the session and
    /// return to the login screen.
    fn force_logout(&mut self) {
        tracing::info!("backend returned 401, clearing session");
        self.clear_session();
        self.toasts.error(ApiError::Unauthorized.to_string());
    }

    // ── Request spawning ─────────────────────────────────────────────

    fn spawn_login(&self, request: crate::api::models::LoginRequest) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.login(&request).await;
            let _ = tx.send(AppEvent::Api(ApiEvent::LoggedIn(result))).await;
        });
    }

    fn spawn_signup(&self, request: crate::api::models::SignupRequest) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.signup(&request).await;
            let _ = tx.send(AppEvent::Api(ApiEvent::SignedUp(result))).await;
        });
    }

    fn spawn_logout(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.logout().await;
            let _ = tx.send(AppEvent::Api(ApiEvent::LoggedOut(result))).await;
        });
    }

    fn spawn_fetch(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.list_tasks().await;
            let _ = tx.send(AppEvent::Api(ApiEvent::TasksFetched(result))).await;
        });
    }

    fn spawn_create(&self, draft: TaskDraft) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.create_task(&draft).await;
            let _ = tx.send(AppEvent::Api(ApiEvent::TaskCreated(result))).await;
        });
    }

    fn spawn_update(&self, task: Task) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.update_task(&task).await;
            let _ = tx.send(AppEvent::Api(ApiEvent::TaskUpdated(result))).await;
        });
    }

    fn spawn_delete(&self, id: String) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.delete_task(&id).await;
            let _ = tx
                .send(AppEvent::Api(ApiEvent::TaskDeleted { id, result }))
                .await;
        });
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn draw(&self, frame: &mut Frame) {
        let mut constraints = vec![Constraint::Length(1)];
        if self.welcome_visible {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(5));
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(frame.area());

        self.draw_top_bar(frame, chunks[0]);
        let mut next = 1;
        if self.welcome_visible {
            self.draw_welcome(frame, chunks[next]);
            next += 1;
        }
        let body = chunks[next];
        match self.screen {
            Screen::Login => crate::auth::view::render_login(frame, body, &self.login),
            Screen::Signup => crate::auth::view::render_signup(frame, body, &self.signup),
            Screen::Board => board::view::render(frame, body, &self.board, &self.tasks),
        }
        self.draw_toast(frame, chunks[next + 1]);
    }

    fn draw_top_bar(&self, frame: &mut Frame, area: Rect) {
        let bar_style = Style::default().bg(Color::Blue).fg(Color::White);
        let session = match self.auth.user() {
            Some(user) => format!("{} · Ctrl-D logout ", user.email),
            None => "Login / Signup ".to_string(),
        };
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Min(0),
                Constraint::Length(session.chars().count() as u16),
            ])
            .split(area);
        frame.render_widget(
            Paragraph::new(format!("{TASKS}Task Manager"))
                .style(bar_style.add_modifier(Modifier::BOLD)),
            chunks[0],
        );
        frame.render_widget(Paragraph::new(session).style(bar_style), chunks[1]);
    }

    fn draw_welcome(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Paragraph::new(format!("{WAVE}{WELCOME_MESSAGE}  [x] dismiss"))
                .style(Style::default().bg(Color::Yellow).fg(Color::Black)),
            area,
        );
    }

    fn draw_toast(&self, frame: &mut Frame, area: Rect) {
        let Some(toast) = self.toasts.current() else {
            return;
        };
        let (prefix, color) = match toast.kind {
            ToastKind::Success => (CHECK, Color::Green),
            ToastKind::Error => (CROSS, Color::Red),
        };
        frame.render_widget(
            Paragraph::new(format!("{prefix}{}", toast.message))
                .style(Style::default().fg(color)),
            area,
        );
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw terminal mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to initialize terminal")
}

/// Restores the terminal on drop, including on error paths.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

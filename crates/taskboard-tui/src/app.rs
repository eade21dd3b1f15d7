use chrono::Utc;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Position, Terminal};
use std::collections::HashMap;
use std::io;
use taskboard_client::{AuthContext, BoardDirectory, Workspace};
use taskboard_core::{AppConfig, InputState, TaskboardError, TaskboardResult};
use taskboard_domain::due::shortcut;
use taskboard_domain::payload::{DESCRIPTION_MAX_CHARS, NAME_MAX_CHARS};
use taskboard_domain::{ColumnId, Task, TaskId, TaskUpdate};

use crate::dialog::{handle_dialog_input, DialogAction};
use crate::editable::{CommitOutcome, EditableField, FieldEvent};
use crate::events::{Event, EventHandler};
use crate::login::{AuthForm, AuthMode, FormAction};
use crate::selection::SelectionState;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
    Board,
    TaskDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    CreateBoard,
    CreateColumn,
    CreateTask,
    ConfirmDeleteTask,
    ConfirmDeleteColumn,
}

/// A column as laid out on the board screen: the inbox column first, then
/// the board's columns by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub inbox: bool,
    pub column_id: ColumnId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRef {
    pub column: ColumnRef,
    pub task_id: TaskId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    BoardName,
    ColumnName(ColumnRef),
    TaskName,
    TaskDescription,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Every editable field on screen, kept in step with the snapshot.
pub struct Fields {
    pub board_name: EditableField,
    pub column_names: HashMap<ColumnRef, EditableField>,
    pub task_name: EditableField,
    pub task_description: EditableField,
    max_name_length: usize,
}

/// The configured name length, never beyond what the server accepts.
fn name_limit(config: &AppConfig) -> usize {
    match config.effective_max_name_length() {
        0 => NAME_MAX_CHARS,
        configured => configured.min(NAME_MAX_CHARS),
    }
}

impl Fields {
    fn new(max_name_length: usize) -> Self {
        Self {
            board_name: EditableField::new("").with_max_chars(max_name_length),
            column_names: HashMap::new(),
            task_name: EditableField::new("").with_max_chars(max_name_length),
            task_description: EditableField::multiline("").with_max_chars(DESCRIPTION_MAX_CHARS),
            max_name_length,
        }
    }

    pub fn get_mut(&mut self, target: EditTarget) -> Option<&mut EditableField> {
        match target {
            EditTarget::BoardName => Some(&mut self.board_name),
            EditTarget::ColumnName(column) => self.column_names.get_mut(&column),
            EditTarget::TaskName => Some(&mut self.task_name),
            EditTarget::TaskDescription => Some(&mut self.task_description),
        }
    }

    pub fn area(&self, target: EditTarget) -> Option<ratatui::layout::Rect> {
        match target {
            EditTarget::BoardName => self.board_name.area(),
            EditTarget::ColumnName(column) => self.column_names.get(&column).and_then(|f| f.area()),
            EditTarget::TaskName => self.task_name.area(),
            EditTarget::TaskDescription => self.task_description.area(),
        }
    }

    /// The field currently in its editor, if any.
    pub fn editing(&self) -> Option<EditTarget> {
        if self.board_name.is_editing() {
            return Some(EditTarget::BoardName);
        }
        if let Some((column, _)) = self.column_names.iter().find(|(_, f)| f.is_editing()) {
            return Some(EditTarget::ColumnName(*column));
        }
        if self.task_name.is_editing() {
            return Some(EditTarget::TaskName);
        }
        if self.task_description.is_editing() {
            return Some(EditTarget::TaskDescription);
        }
        None
    }

    fn targets(&self) -> Vec<EditTarget> {
        let mut targets = vec![
            EditTarget::BoardName,
            EditTarget::TaskName,
            EditTarget::TaskDescription,
        ];
        targets.extend(self.column_names.keys().map(|c| EditTarget::ColumnName(*c)));
        targets
    }

    fn sync(&mut self, workspace: &Workspace, detail: Option<&Task>) {
        self.board_name.set_source(&workspace.board.snapshot().name);

        let max = self.max_name_length;
        let mut seen = Vec::new();
        for (inbox, session) in [(true, &workspace.inbox), (false, &workspace.board)] {
            for column in &session.snapshot().lists {
                let key = ColumnRef {
                    inbox,
                    column_id: column.id,
                };
                self.column_names
                    .entry(key)
                    .or_insert_with(|| EditableField::new("").with_max_chars(max))
                    .set_source(&column.name);
                seen.push(key);
            }
        }
        self.column_names.retain(|key, _| seen.contains(key));

        if let Some(task) = detail {
            self.task_name.set_source(&task.name);
            self.task_description
                .set_source(task.description.as_deref().unwrap_or(""));
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub mode: AppMode,
    pub input: InputState,
    pub status: Option<StatusMessage>,
    pub auth: AuthContext,
    pub login: AuthForm,
    pub directory: BoardDirectory,
    pub board_selection: SelectionState,
    pub workspace: Option<Workspace>,
    pub column_focus: usize,
    pub task_selection: SelectionState,
    pub detail: Option<TaskRef>,
    pub fields: Fields,
}

impl App {
    pub fn new(auth: AuthContext, config: &AppConfig) -> Self {
        let directory = BoardDirectory::new(auth.api());
        let max_name_length = name_limit(config);
        Self {
            should_quit: false,
            screen: Screen::Login,
            mode: AppMode::Normal,
            input: InputState::with_max_chars(max_name_length),
            status: None,
            auth,
            login: AuthForm::new(),
            directory,
            board_selection: SelectionState::new(),
            workspace: None,
            column_focus: 0,
            task_selection: SelectionState::new(),
            detail: None,
            fields: Fields::new(max_name_length),
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    /// Surfaces a failed call. A rejected session logs the user out.
    fn report(&mut self, err: TaskboardError) {
        if err.is_unauthorized() {
            self.handle_unauthorized(err.to_string());
            return;
        }
        self.status = Some(StatusMessage {
            text: err.to_string(),
            is_error: true,
        });
    }

    fn handle_unauthorized(&mut self, message: String) {
        tracing::warn!("Session ended: {}", message);
        if let Err(e) = self.auth.teardown() {
            tracing::error!("Failed to clear credentials: {}", e);
        }
        self.workspace = None;
        self.detail = None;
        self.mode = AppMode::Normal;
        self.status = None;
        self.fields = Fields::new(self.fields.max_name_length);
        self.login.reset(Some(message));
        self.screen = Screen::Login;
    }

    // Board screen geometry

    pub fn visible_columns(&self) -> Vec<ColumnRef> {
        let Some(workspace) = &self.workspace else {
            return Vec::new();
        };
        let inbox = workspace.inbox.sorted_columns().into_iter().map(|c| ColumnRef {
            inbox: true,
            column_id: c.id,
        });
        let board = workspace.board.sorted_columns().into_iter().map(|c| ColumnRef {
            inbox: false,
            column_id: c.id,
        });
        inbox.chain(board).collect()
    }

    pub fn focused_column(&self) -> Option<ColumnRef> {
        self.visible_columns().get(self.column_focus).copied()
    }

    pub fn tasks_in(&self, column: ColumnRef) -> Vec<&Task> {
        self.workspace
            .as_ref()
            .map(|w| w.session(column.inbox).sorted_tasks(column.column_id))
            .unwrap_or_default()
    }

    pub fn selected_task(&self) -> Option<TaskRef> {
        let column = self.focused_column()?;
        let idx = self.task_selection.get()?;
        let task = self.tasks_in(column).get(idx).map(|t| t.id)?;
        Some(TaskRef {
            column,
            task_id: task,
        })
    }

    pub fn detail_task(&self) -> Option<&Task> {
        let detail = self.detail?;
        self.workspace.as_ref().and_then(|w| {
            w.session(detail.column.inbox)
                .snapshot()
                .task(detail.column.column_id, detail.task_id)
                .map(|t| t.as_ref())
        })
    }

    fn after_snapshot_change(&mut self) {
        let columns = self.visible_columns().len();
        if columns == 0 {
            self.column_focus = 0;
        } else {
            self.column_focus = self.column_focus.min(columns - 1);
        }
        let tasks = self.focused_column().map(|c| self.tasks_in(c).len()).unwrap_or(0);
        self.task_selection.clamp(tasks);

        if self.screen == Screen::TaskDetail && self.detail_task().is_none() {
            self.detail = None;
            self.screen = Screen::Board;
        }

        if let Some(workspace) = &self.workspace {
            let detail = self.detail.and_then(|d| {
                workspace
                    .session(d.column.inbox)
                    .snapshot()
                    .task(d.column.column_id, d.task_id)
                    .cloned()
            });
            self.fields.sync(workspace, detail.as_deref());
        }
    }

    // Navigation

    async fn enter_dashboard(&mut self) {
        self.screen = Screen::Dashboard;
        self.workspace = None;
        self.detail = None;
        match self.directory.refresh().await {
            Ok(()) => self.board_selection.clamp(self.directory.boards().len()),
            Err(e) => self.report(e),
        }
    }

    async fn open_board(&mut self) {
        let Some(board) = self
            .board_selection
            .get()
            .and_then(|idx| self.directory.boards().get(idx))
        else {
            return;
        };
        let board_id = board.id;
        match Workspace::load(self.auth.api(), board_id).await {
            Ok(workspace) => {
                self.workspace = Some(workspace);
                self.screen = Screen::Board;
                self.column_focus = 0;
                self.task_selection = SelectionState::new();
                self.fields = Fields::new(self.fields.max_name_length);
                self.after_snapshot_change();
            }
            Err(e) => self.report(e),
        }
    }

    fn open_detail(&mut self) {
        if let Some(task) = self.selected_task() {
            self.detail = Some(task);
            self.screen = Screen::TaskDetail;
            self.after_snapshot_change();
        }
    }

    // Input routing

    async fn handle_key_event(&mut self, key: KeyEvent) {
        if self.mode == AppMode::Normal && self.fields.editing().is_none() {
            self.status = None;
        }
        if let Some(target) = self.fields.editing() {
            let event = match self.fields.get_mut(target) {
                Some(field) => field.handle_key(key),
                None => FieldEvent::Ignored,
            };
            if let FieldEvent::Close(_) = event {
                self.commit_edit(target).await;
            }
            return;
        }

        match self.mode {
            AppMode::Normal => {}
            AppMode::ConfirmDeleteTask | AppMode::ConfirmDeleteColumn => {
                self.handle_confirm_key(key).await;
                return;
            }
            _ => {
                self.handle_prompt_key(key).await;
                return;
            }
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key).await,
            Screen::Dashboard => self.handle_dashboard_key(key).await,
            Screen::Board => self.handle_board_key(key).await,
            Screen::TaskDetail => self.handle_detail_key(key).await,
        }
    }

    async fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if let Some(target) = self.fields.editing() {
            let event = match self.fields.get_mut(target) {
                Some(field) => field.handle_mouse(mouse),
                None => FieldEvent::Ignored,
            };
            if let FieldEvent::Close(_) = event {
                self.commit_edit(target).await;
            } else {
                return;
            }
        }

        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.mode != AppMode::Normal {
            return;
        }
        let position = Position::new(mouse.column, mouse.row);
        let clicked = self.fields.targets().into_iter().find(|target| {
            self.fields
                .area(*target)
                .map(|area| area.contains(position))
                .unwrap_or(false)
        });
        if let Some(target) = clicked {
            self.begin_edit(target);
        }
    }

    async fn handle_login_key(&mut self, key: KeyEvent) {
        match self.login.handle_key(key) {
            FormAction::Quit => self.quit(),
            FormAction::None => {}
            FormAction::Submit => self.submit_login().await,
        }
    }

    async fn submit_login(&mut self) {
        let username = self.login.username.as_str().to_string();
        let password = self.login.password.as_str().to_string();
        match self.login.mode {
            AuthMode::Login => match self.auth.login(&username, &password).await {
                Ok(_) => {
                    self.login.reset(None);
                    self.enter_dashboard().await;
                }
                Err(e) => {
                    self.login.password.clear();
                    self.login.error = Some(e.to_string());
                }
            },
            AuthMode::Register => {
                let email = self.login.email.as_str().to_string();
                match self.auth.register(&email, &username, &password).await {
                    Ok(()) => self.login.registered(),
                    Err(e) => self.login.error = Some(e.to_string()),
                }
            }
        }
    }

    async fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('j') | KeyCode::Down => {
                self.board_selection.next(self.directory.boards().len())
            }
            KeyCode::Char('k') | KeyCode::Up => self.board_selection.prev(),
            KeyCode::Char('n') => {
                self.input.clear();
                self.mode = AppMode::CreateBoard;
            }
            KeyCode::Char('g') => {
                if let Err(e) = self.directory.refresh().await {
                    self.report(e);
                }
            }
            KeyCode::Char('L') => {
                self.handle_unauthorized("Logged out".to_string());
                self.login.error = None;
                self.login.notice = Some("Logged out".to_string());
            }
            KeyCode::Enter => self.open_board().await,
            _ => {}
        }
    }

    async fn handle_board_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc => self.enter_dashboard().await,
            KeyCode::Char('h') | KeyCode::Left => {
                self.column_focus = self.column_focus.saturating_sub(1);
                self.task_selection = SelectionState::new();
                self.after_snapshot_change();
            }
            KeyCode::Char('l') | KeyCode::Right => {
                let columns = self.visible_columns().len();
                if self.column_focus + 1 < columns {
                    self.column_focus += 1;
                }
                self.task_selection = SelectionState::new();
                self.after_snapshot_change();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let tasks = self.focused_column().map(|c| self.tasks_in(c).len()).unwrap_or(0);
                self.task_selection.next(tasks);
            }
            KeyCode::Char('k') | KeyCode::Up => self.task_selection.prev(),
            KeyCode::Char('n') => {
                if self.focused_column().is_some() {
                    self.input.clear();
                    self.mode = AppMode::CreateTask;
                }
            }
            KeyCode::Char('N') => {
                self.input.clear();
                self.mode = AppMode::CreateColumn;
            }
            KeyCode::Char('r') => {
                if let Some(column) = self.focused_column() {
                    self.begin_edit(EditTarget::ColumnName(column));
                }
            }
            KeyCode::Char('R') => self.begin_edit(EditTarget::BoardName),
            KeyCode::Char('x') => {
                if let Some(task) = self.selected_task() {
                    self.toggle_done(task).await;
                }
            }
            KeyCode::Char('d') => {
                if self.selected_task().is_some() {
                    self.mode = AppMode::ConfirmDeleteTask;
                }
            }
            KeyCode::Char('D') => {
                if self.focused_column().is_some() {
                    self.mode = AppMode::ConfirmDeleteColumn;
                }
            }
            KeyCode::Enter => self.open_detail(),
            _ => {}
        }
    }

    async fn handle_detail_key(&mut self, key: KeyEvent) {
        let Some(detail) = self.detail else {
            self.screen = Screen::Board;
            return;
        };
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc => {
                self.detail = None;
                self.screen = Screen::Board;
            }
            KeyCode::Char('e') => self.begin_edit(EditTarget::TaskName),
            KeyCode::Char('E') => self.begin_edit(EditTarget::TaskDescription),
            KeyCode::Char('x') => self.toggle_done(detail).await,
            KeyCode::Char('t') => {
                let due = shortcut(Utc::now(), 1);
                self.update_task(detail, TaskUpdate::due(due)).await;
            }
            KeyCode::Char('w') => {
                let due = shortcut(Utc::now(), 7);
                self.update_task(detail, TaskUpdate::due(due)).await;
            }
            KeyCode::Char('c') => self.update_task(detail, TaskUpdate::clear_due()).await,
            KeyCode::Char('d') => self.mode = AppMode::ConfirmDeleteTask,
            KeyCode::Char(c @ '1'..='9') => {
                let idx = (c as usize) - ('1' as usize);
                self.toggle_tag(detail, idx).await;
            }
            _ => {}
        }
    }

    async fn handle_prompt_key(&mut self, key: KeyEvent) {
        match handle_dialog_input(&mut self.input, key, false) {
            DialogAction::Cancel => self.mode = AppMode::Normal,
            DialogAction::Confirm => {
                let name = self.input.as_str().to_string();
                let mode = self.mode;
                self.mode = AppMode::Normal;
                self.input.clear();
                match mode {
                    AppMode::CreateBoard => self.create_board(&name).await,
                    AppMode::CreateColumn => self.create_column(&name).await,
                    AppMode::CreateTask => self.create_task(&name).await,
                    _ => {}
                }
            }
            DialogAction::None | DialogAction::NextField => {}
        }
    }

    async fn handle_confirm_key(&mut self, key: KeyEvent) {
        let mode = self.mode;
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.mode = AppMode::Normal;
                match mode {
                    AppMode::ConfirmDeleteTask => self.delete_task().await,
                    AppMode::ConfirmDeleteColumn => self.delete_column().await,
                    _ => {}
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => self.mode = AppMode::Normal,
            _ => {}
        }
    }

    // Editable fields

    fn begin_edit(&mut self, target: EditTarget) {
        if let EditTarget::ColumnName(column) = target {
            if column.inbox {
                self.report(TaskboardError::validation("cannot rename the list of the inbox"));
                return;
            }
        }
        let allowed = match target {
            EditTarget::BoardName | EditTarget::ColumnName(_) => self.screen == Screen::Board,
            EditTarget::TaskName | EditTarget::TaskDescription => self.screen == Screen::TaskDetail,
        };
        if !allowed {
            return;
        }
        let style = ui::field_style(target);
        if let Some(field) = self.fields.get_mut(target) {
            field.activate(style);
        }
    }

    async fn commit_edit(&mut self, target: EditTarget) {
        let Some(workspace) = self.workspace.as_mut() else {
            return;
        };
        let detail = self.detail;
        let Some(field) = self.fields.get_mut(target) else {
            return;
        };

        let result = match (target, detail) {
            (EditTarget::BoardName, _) => {
                field
                    .commit(move |name| async move { workspace.board.rename_board(&name).await })
                    .await
            }
            (EditTarget::ColumnName(column), _) => {
                field
                    .commit(move |name| async move {
                        workspace
                            .session_mut(column.inbox)
                            .rename_column(column.column_id, &name)
                            .await
                    })
                    .await
            }
            (EditTarget::TaskName, Some(task)) => {
                field
                    .commit(move |name| async move {
                        workspace
                            .session_mut(task.column.inbox)
                            .update_task(task.column.column_id, task.task_id, &TaskUpdate::rename(&name))
                            .await
                    })
                    .await
            }
            (EditTarget::TaskDescription, Some(task)) => {
                field
                    .commit(move |text| async move {
                        workspace
                            .session_mut(task.column.inbox)
                            .update_task(task.column.column_id, task.task_id, &TaskUpdate::describe(&text))
                            .await
                    })
                    .await
            }
            (EditTarget::TaskName | EditTarget::TaskDescription, None) => {
                field.cancel();
                Ok(CommitOutcome::Skipped)
            }
        };

        match result {
            Ok(CommitOutcome::Saved(value)) => {
                tracing::debug!("Saved {:?} as {:?}", target, value);
                self.after_snapshot_change();
            }
            Ok(_) => {}
            Err(e) => self.report(e),
        }
    }

    // Mutations

    async fn create_board(&mut self, name: &str) {
        match self.directory.create(name, None).await {
            Ok(board) => {
                let name = board.name.clone();
                self.board_selection.jump_to_last(self.directory.boards().len());
                self.info(format!("Created board {}", name));
            }
            Err(e) => self.report(e),
        }
    }

    async fn create_column(&mut self, name: &str) {
        let Some(workspace) = self.workspace.as_mut() else {
            return;
        };
        let result = workspace.board.create_column(name).await;
        match result {
            Ok(_) => {
                self.after_snapshot_change();
                self.column_focus = self.visible_columns().len().saturating_sub(1);
                self.task_selection = SelectionState::new();
            }
            Err(e) => self.report(e),
        }
    }

    async fn create_task(&mut self, name: &str) {
        let Some(column) = self.focused_column() else {
            return;
        };
        let Some(workspace) = self.workspace.as_mut() else {
            return;
        };
        let result = workspace
            .session_mut(column.inbox)
            .create_task(column.column_id, name)
            .await;
        match result {
            Ok(task_id) => {
                self.after_snapshot_change();
                let idx = self.tasks_in(column).iter().position(|t| t.id == task_id);
                self.task_selection.set(idx);
            }
            Err(e) => self.report(e),
        }
    }

    async fn delete_task(&mut self) {
        let target = match self.screen {
            Screen::TaskDetail => self.detail,
            _ => self.selected_task(),
        };
        let Some(task) = target else {
            return;
        };
        let Some(workspace) = self.workspace.as_mut() else {
            return;
        };
        let result = workspace
            .session_mut(task.column.inbox)
            .delete_task(task.column.column_id, task.task_id)
            .await;
        match result {
            Ok(()) => self.after_snapshot_change(),
            Err(e) => self.report(e),
        }
    }

    async fn delete_column(&mut self) {
        let Some(column) = self.focused_column() else {
            return;
        };
        let Some(workspace) = self.workspace.as_mut() else {
            return;
        };
        let result = workspace
            .session_mut(column.inbox)
            .delete_column(column.column_id)
            .await;
        match result {
            Ok(()) => {
                self.task_selection = SelectionState::new();
                self.after_snapshot_change();
            }
            Err(e) => self.report(e),
        }
    }

    async fn toggle_done(&mut self, task: TaskRef) {
        let Some(workspace) = self.workspace.as_mut() else {
            return;
        };
        let result = workspace
            .session_mut(task.column.inbox)
            .toggle_done(task.column.column_id, task.task_id)
            .await;
        match result {
            Ok(()) => self.after_snapshot_change(),
            Err(e) => self.report(e),
        }
    }

    async fn update_task(&mut self, task: TaskRef, update: TaskUpdate) {
        let Some(workspace) = self.workspace.as_mut() else {
            return;
        };
        let result = workspace
            .session_mut(task.column.inbox)
            .update_task(task.column.column_id, task.task_id, &update)
            .await;
        match result {
            Ok(()) => self.after_snapshot_change(),
            Err(e) => self.report(e),
        }
    }

    async fn toggle_tag(&mut self, task: TaskRef, index: usize) {
        let Some(workspace) = self.workspace.as_mut() else {
            return;
        };
        let session = workspace.session_mut(task.column.inbox);
        let Some(tag_id) = session.snapshot().tags.get(index).map(|t| t.id) else {
            return;
        };
        let result = session
            .toggle_tag(task.column.column_id, task.task_id, tag_id)
            .await;
        match result {
            Ok(()) => self.after_snapshot_change(),
            Err(e) => self.report(e),
        }
    }

    // Event loop

    pub async fn run(&mut self) -> TaskboardResult<()> {
        if let Err(e) = self.auth.initialize().await {
            tracing::warn!("Could not restore session: {}", e);
        }
        if self.auth.is_authenticated() {
            self.enter_dashboard().await;
        }

        let mut terminal = setup_terminal()?;
        let mut events = EventHandler::new();

        while !self.should_quit {
            terminal.draw(|frame| ui::render(self, frame))?;

            match events.next().await {
                Some(Event::Key(key)) => self.handle_key_event(key).await,
                Some(Event::Mouse(mouse)) => self.handle_mouse_event(mouse).await,
                Some(Event::Resize) | Some(Event::Tick) => {}
                None => break,
            }
        }

        events.stop();
        restore_terminal(&mut terminal)?;
        Ok(())
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

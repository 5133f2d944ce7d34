//! Task board state: three status columns over the task store.
//!
//! Everything here is pure bookkeeping — rendering lives in [`view`], and
//! no function in this module performs IO. The columns are always a
//! partition of the store by status; the search filter narrows what each
//! column *shows* without ever touching the store.

pub mod view;

use chrono::NaiveDate;

use crate::api::models::{Task, TaskDraft, TaskPriority, TaskStatus};
use crate::store::TaskStore;

/// Board columns in render order, left to right.
pub const COLUMNS: [TaskStatus; 3] = TaskStatus::ALL;

/// What the board is currently capturing keys for.
#[derive(Debug, Default)]
pub enum BoardMode {
    #[default]
    Normal,
    /// Typing into the search box.
    Search,
    /// Read-only detail modal.
    View { task_id: String },
    /// Edit modal with its working copy.
    Edit(EditForm),
    /// Delete confirmation modal.
    ConfirmDelete { task_id: String, title: String },
}

/// Fields of the edit modal, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Description,
    Status,
    Priority,
    DueDate,
}

impl EditField {
    pub const ALL: [EditField; 5] = [
        EditField::Title,
        EditField::Description,
        EditField::Status,
        EditField::Priority,
        EditField::DueDate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Status => "Status",
            Self::Priority => "Priority",
            Self::DueDate => "Due Date",
        }
    }
}

/// Working copy of a task being edited. Saving produces a full record for
/// the PUT; the store is only touched when the server's response comes
/// back.
#[derive(Debug, Clone)]
pub struct EditForm {
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Due date edited as text, `YYYY-MM-DD` or empty for none.
    pub due_input: String,
    pub focus: usize,
    pub error: Option<String>,
}

impl EditForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            due_input: task
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            focus: 0,
            error: None,
        }
    }

    pub fn focused(&self) -> EditField {
        EditField::ALL[self.focus % EditField::ALL.len()]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % EditField::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + EditField::ALL.len() - 1) % EditField::ALL.len();
    }

    pub fn insert(&mut self, c: char) {
        match self.focused() {
            EditField::Title => self.title.push(c),
            EditField::Description => self.description.push(c),
            EditField::DueDate => self.due_input.push(c),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focused() {
            EditField::Title => self.title.pop(),
            EditField::Description => self.description.pop(),
            EditField::DueDate => self.due_input.pop(),
            _ => return,
        };
    }

    /// Cycle the enum fields; no-op when a text field is focused.
    pub fn cycle(&mut self) {
        match self.focused() {
            EditField::Status => self.status = self.status.next(),
            EditField::Priority => self.priority = self.priority.next(),
            _ => {}
        }
    }

    /// Assemble the full record for the PUT, or record an inline error when
    /// the due date text doesn't parse.
    pub fn to_task(&mut self) -> Option<Task> {
        let due_date = match self.due_input.trim() {
            "" => None,
            s => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    self.error = Some("Due date must be YYYY-MM-DD".to_string());
                    return None;
                }
            },
        };
        self.error = None;
        Some(Task {
            id: self.task_id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            due_date,
        })
    }
}

/// View state of the board screen.
#[derive(Debug)]
pub struct BoardState {
    /// True until the initial fetch resolves.
    pub loading: bool,
    /// Fatal fetch error — the board halts on this screen.
    pub error: Option<String>,
    pub search: String,
    pub selected_column: usize,
    pub selected_row: usize,
    pub mode: BoardMode,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            search: String::new(),
            selected_column: 0,
            selected_row: 0,
            mode: BoardMode::Normal,
        }
    }
}

impl BoardState {
    /// Fresh board, pending a fetch. Used on every entry to the screen.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn selected_status(&self) -> TaskStatus {
        COLUMNS[self.selected_column % COLUMNS.len()]
    }

    /// Tasks shown in `status`'s column under the current search filter.
    pub fn visible_in<'a>(&self, store: &'a TaskStore, status: TaskStatus) -> Vec<&'a Task> {
        store
            .tasks()
            .iter()
            .filter(|t| t.status == status && matches_search(t, &self.search))
            .collect()
    }

    /// The card under the cursor, if the selected column has any.
    pub fn selected_task<'a>(&self, store: &'a TaskStore) -> Option<&'a Task> {
        let column = self.visible_in(store, self.selected_status());
        if column.is_empty() {
            return None;
        }
        Some(column[self.selected_row.min(column.len() - 1)])
    }

    /// Keep the cursor inside the (possibly shrunk) selected column.
    pub fn clamp_selection(&mut self, store: &TaskStore) {
        let len = self.visible_in(store, self.selected_status()).len();
        self.selected_row = if len == 0 {
            0
        } else {
            self.selected_row.min(len - 1)
        };
    }

    pub fn select_column(&mut self, delta: isize) {
        let cols = COLUMNS.len() as isize;
        let next = self.selected_column as isize + delta;
        self.selected_column = next.clamp(0, cols - 1) as usize;
    }

    pub fn select_row(&mut self, delta: isize, store: &TaskStore) {
        let len = self.visible_in(store, self.selected_status()).len();
        if len == 0 {
            self.selected_row = 0;
            return;
        }
        let next = self.selected_row as isize + delta;
        self.selected_row = next.clamp(0, len as isize - 1) as usize;
    }

    /// Destination column for moving the selected card one step, if it
    /// stays on the board.
    pub fn move_destination(&self, delta: isize) -> Option<TaskStatus> {
        let next = self.selected_column as isize + delta;
        if (0..COLUMNS.len() as isize).contains(&next) {
            Some(COLUMNS[next as usize])
        } else {
            None
        }
    }
}

/// Case-insensitive substring match on title or description. An empty query
/// matches everything.
pub fn matches_search(task: &Task, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    task.title.to_lowercase().contains(&query) || task.description.to_lowercase().contains(&query)
}

/// The dropped card with its status recomputed from the destination column.
/// Dropping into the source column is not a move — nothing is sent.
pub fn reclassify(task: &Task, destination: TaskStatus) -> Option<Task> {
    if task.status == destination {
        return None;
    }
    let mut moved = task.clone();
    moved.status = destination;
    Some(moved)
}

/// The fixed placeholder record the Add operation always creates.
pub fn default_draft(today: NaiveDate) -> TaskDraft {
    TaskDraft {
        title: "New Task".to_string(),
        description: "New Description".to_string(),
        status: TaskStatus::ToDo,
        priority: TaskPriority::Medium,
        due_date: Some(today),
    }
}

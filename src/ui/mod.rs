//! Shell-level UI pieces shared by every screen: the toast host and popup
//! geometry helpers.

pub mod icons;

use std::time::{Duration, Instant};

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    expires_at: Instant,
}

/// Transient status messages, newest wins the single toast line.
#[derive(Debug)]
pub struct Toasts {
    entries: Vec<Toast>,
    ttl: Duration,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(TOAST_TTL)
    }
}

impl Toasts {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Vec::new(),
            ttl,
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        self.entries.push(Toast {
            message,
            kind,
            expires_at: Instant::now() + self.ttl,
        });
    }

    /// Drop expired toasts. Called on every UI tick.
    pub fn prune(&mut self) {
        let now = Instant::now();
        self.entries.retain(|t| t.expires_at > now);
    }

    /// The toast currently shown, if any.
    pub fn current(&self) -> Option<&Toast> {
        self.entries.last()
    }
}

/// Centered popup rect taking the given percentage of the area.
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

//! Wire types for the Task Manager backend.
//!
//! Field names follow the backend's JSON exactly: task identifiers arrive as
//! `_id`, the due date as `dueDate`, and status/priority as the
//! human-readable strings the web client shows ("To Do", "High", ...).
//! Unknown fields (`createdAt`, `__v`, ...) are ignored on deserialization.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The three board columns. A task is always in exactly one of them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl TaskStatus {
    /// All statuses in board order, left to right.
    pub const ALL: [TaskStatus; 3] = [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Column heading, matching the web board's uppercase titles.
    pub fn column_title(&self) -> &'static str {
        match self {
            Self::ToDo => "TODO",
            Self::InProgress => "IN PROGRESS",
            Self::Done => "DONE",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::ToDo => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::ToDo,
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "To Do" => Ok(Self::ToDo),
            "In Progress" => Ok(Self::InProgress),
            "Done" => Ok(Self::Done),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            _ => Err(format!("Invalid priority: {}", s)),
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as stored by the backend. Identifiers are server-assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(
        rename = "dueDate",
        default,
        with = "due_date_format",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
}

/// Create payload — a task without an identifier.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(
        rename = "dueDate",
        with = "due_date_format",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
}

/// The session payload returned by login/signup. Only the fields the client
/// renders are kept; `email` gates the authenticated UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

/// Generic confirmation body (`{"message": "..."}`) from logout/delete.
#[derive(Debug, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Due dates are sent as plain `YYYY-MM-DD` but may come back from the
/// backend as full RFC 3339 datetimes; accept both.
mod due_date_format {
    use chrono::{DateTime, NaiveDate};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => parse(s).map(Some).map_err(serde::de::Error::custom),
        }
    }

    fn parse(s: &str) -> Result<NaiveDate, String> {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.date_naive())
            .map_err(|_| format!("Invalid due date: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_deserializes_backend_document() {
        let json = r#"{
            "_id": "64f1c0ffee",
            "title": "Ship release",
            "description": "Cut the 1.2 branch",
            "status": "In Progress",
            "priority": "High",
            "dueDate": "2026-08-06T00:00:00.000Z",
            "user": "64f1aaaa",
            "createdAt": "2026-08-01T10:00:00.000Z",
            "__v": 0
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "64f1c0ffee");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(
            task.due_date,
            Some(NaiveDate::from_ymd_opt(2026, 8, 6).unwrap())
        );
    }

    #[test]
    fn task_accepts_plain_due_date_and_missing_due_date() {
        let with_date: Task = serde_json::from_str(
            r#"{"_id":"1","title":"t","description":"d","status":"To Do","priority":"Low","dueDate":"2026-01-31"}"#,
        )
        .unwrap();
        assert_eq!(
            with_date.due_date,
            Some(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap())
        );

        let without: Task = serde_json::from_str(
            r#"{"_id":"2","title":"t","description":"d","status":"Done","priority":"Low"}"#,
        )
        .unwrap();
        assert_eq!(without.due_date, None);
    }

    #[test]
    fn task_serializes_wire_field_names() {
        let task = Task {
            id: "abc".into(),
            title: "t".into(),
            description: "d".into(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::Medium,
            due_date: Some(NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["_id"], "abc");
        assert_eq!(json["status"], "In Progress");
        assert_eq!(json["dueDate"], "2026-08-06");
    }

    #[test]
    fn draft_has_no_identifier() {
        let draft = TaskDraft {
            title: "New Task".into(),
            description: "New Description".into(),
            status: TaskStatus::ToDo,
            priority: TaskPriority::Medium,
            due_date: None,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("_id").is_none());
        assert!(json.get("dueDate").is_none());
    }

    #[test]
    fn status_from_str_rejects_unknown_values() {
        assert!(TaskStatus::from_str("To Do").is_ok());
        assert!(TaskStatus::from_str("todo").is_err());
        assert!(TaskPriority::from_str("Urgent").is_err());
    }

    #[test]
    fn signup_request_uses_camel_case_confirm_password() {
        let req = SignupRequest {
            firstname: "Ada".into(),
            lastname: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "difference".into(),
            confirm_password: "difference".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("confirmPassword").is_some());
        assert!(json.get("confirm_password").is_none());
    }

    #[test]
    fn session_user_tolerates_missing_profile_fields() {
        let user: SessionUser = serde_json::from_str(r#"{"email":"ada@example.com"}"#).unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.firstname, "");
        assert!(user.id.is_none());
    }
}

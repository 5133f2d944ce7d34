//! Client-side state: the cached task list and the current session.
//!
//! Both stores live on the UI task and are mutated exclusively through
//! [`actions`] applied there — spawned request tasks never touch them, they
//! send results back over the event channel instead. Last response to
//! arrive wins; there is no client-side conflict checking.

pub mod actions;

use crate::api::models::{SessionUser, Task};
use actions::{AuthAction, TaskAction};

/// In-memory copy of the backend's task list.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn apply(&mut self, action: TaskAction) {
        match action {
            TaskAction::Set(tasks) => self.tasks = tasks,
            TaskAction::Add(task) => self.tasks.push(task),
            TaskAction::Update(task) => {
                // A missing id means the task was deleted under us; the
                // stale response is dropped, matching the web client.
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
                    *slot = task;
                }
            }
            TaskAction::Remove(id) => self.tasks.retain(|t| t.id != id),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

/// The authenticated user, if any. Session continuity itself lives in the
/// HTTP client's cookie jar; this store only gates what the UI renders.
#[derive(Debug, Default)]
pub struct AuthStore {
    user: Option<SessionUser>,
}

impl AuthStore {
    pub fn apply(&mut self, action: AuthAction) {
        match action {
            AuthAction::SetCredentials(user) => self.user = Some(user),
            AuthAction::ClearSession => self.user = None,
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{TaskPriority, TaskStatus};

    fn task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            description: String::new(),
            status,
            priority: TaskPriority::Medium,
            due_date: None,
        }
    }

    #[test]
    fn set_replaces_the_whole_list() {
        let mut store = TaskStore::default();
        store.apply(TaskAction::Add(task("old", TaskStatus::Done)));
        store.apply(TaskAction::Set(vec![task("a", TaskStatus::ToDo)]));
        assert_eq!(store.tasks().len(), 1);
        assert!(store.get("old").is_none());
    }

    #[test]
    fn add_appends_exactly_once() {
        let mut store = TaskStore::default();
        store.apply(TaskAction::Add(task("a", TaskStatus::ToDo)));
        assert_eq!(
            store.tasks().iter().filter(|t| t.id == "a").count(),
            1,
            "created task must appear exactly once"
        );
    }

    #[test]
    fn update_replaces_matching_task_only() {
        let mut store = TaskStore::default();
        store.apply(TaskAction::Set(vec![
            task("a", TaskStatus::ToDo),
            task("b", TaskStatus::ToDo),
        ]));

        let mut moved = task("a", TaskStatus::Done);
        moved.title = "moved".into();
        store.apply(TaskAction::Update(moved));

        assert_eq!(store.get("a").unwrap().status, TaskStatus::Done);
        assert_eq!(store.get("b").unwrap().status, TaskStatus::ToDo);
        assert_eq!(store.tasks().len(), 2);
    }

    #[test]
    fn update_for_unknown_id_is_dropped() {
        let mut store = TaskStore::default();
        store.apply(TaskAction::Update(task("ghost", TaskStatus::Done)));
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn remove_leaves_no_task_with_that_id() {
        let mut store = TaskStore::default();
        store.apply(TaskAction::Set(vec![
            task("a", TaskStatus::ToDo),
            task("b", TaskStatus::Done),
        ]));
        store.apply(TaskAction::Remove("a".to_string()));
        assert!(store.get("a").is_none());
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn auth_store_sets_and_clears_session() {
        let mut auth = AuthStore::default();
        assert!(!auth.is_authenticated());

        auth.apply(AuthAction::SetCredentials(SessionUser {
            id: None,
            firstname: "Ada".into(),
            lastname: "Lovelace".into(),
            email: "ada@example.com".into(),
        }));
        assert!(auth.is_authenticated());
        assert_eq!(auth.user().unwrap().email, "ada@example.com");

        auth.apply(AuthAction::ClearSession);
        assert!(!auth.is_authenticated());
    }
}

//! Integration tests for taskdeck.
//!
//! The API client is exercised against an in-process mock of the Task
//! Manager backend (axum) — real sockets, real cookies — and the CLI
//! surface is checked with assert_cmd.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Json;
use serde_json::{Value, json};

const SESSION_COOKIE: &str = "sid=test-session";

#[derive(Default)]
struct MockDb {
    tasks: Vec<Value>,
    next_id: u64,
}

#[derive(Clone, Default)]
struct MockState {
    db: Arc<Mutex<MockDb>>,
}

fn authed(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|cookies| cookies.contains(SESSION_COOKIE))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Not authorized, no token"})),
    )
        .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "difference" {
        (
            [(
                header::SET_COOKIE,
                format!("{SESSION_COOKIE}; Path=/; HttpOnly"),
            )],
            Json(json!({
                "_id": "u1",
                "firstname": "Ada",
                "lastname": "Lovelace",
                "email": body["email"],
            })),
        )
            .into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Invalid credentials"})),
        )
            .into_response()
    }
}

async fn signup(Json(body): Json<Value>) -> Response {
    (
        [(
            header::SET_COOKIE,
            format!("{SESSION_COOKIE}; Path=/; HttpOnly"),
        )],
        Json(json!({
            "_id": "u2",
            "firstname": body["firstname"],
            "lastname": body["lastname"],
            "email": body["email"],
        })),
    )
        .into_response()
}

async fn logout(headers: HeaderMap) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    Json(json!({"message": "Logout successful"})).into_response()
}

async fn list_tasks(State(state): State<MockState>, headers: HeaderMap) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    let db = state.db.lock().unwrap();
    Json(db.tasks.clone()).into_response()
}

async fn create_task(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    let mut db = state.db.lock().unwrap();
    db.next_id += 1;
    body["_id"] = json!(format!("task-{}", db.next_id));
    db.tasks.push(body.clone());
    Json(body).into_response()
}

async fn update_task(
    State(state): State<MockState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    let mut db = state.db.lock().unwrap();
    body["_id"] = json!(id.clone());
    match db.tasks.iter_mut().find(|t| t["_id"] == id.as_str()) {
        Some(slot) => {
            *slot = body.clone();
            Json(body).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Task not found"})),
        )
            .into_response(),
    }
}

async fn delete_task(
    State(state): State<MockState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    let mut db = state.db.lock().unwrap();
    db.tasks.retain(|t| t["_id"] != id.as_str());
    Json(json!({"message": "Task removed"})).into_response()
}

/// Bind the mock backend on an ephemeral port and return its base URL.
async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/v1/user/login", post(login))
        .route("/api/v1/user/signup", post(signup))
        .route("/api/v1/user/logout", post(logout))
        .route("/api/v1/tasks", get(list_tasks).post(create_task))
        .route("/api/v1/tasks/{id}", put(update_task).delete(delete_task))
        .with_state(MockState::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// =============================================================================
// API client against the mock backend
// =============================================================================

mod api_client {
    use super::*;
    use chrono::NaiveDate;
    use taskdeck::api::ApiClient;
    use taskdeck::api::models::{LoginRequest, SignupRequest, TaskDraft, TaskPriority, TaskStatus};
    use taskdeck::errors::ApiError;

    fn credentials() -> LoginRequest {
        LoginRequest {
            email: "ada@example.com".into(),
            password: "difference".into(),
        }
    }

    #[tokio::test]
    async fn calls_without_a_session_map_to_unauthorized() {
        let base = spawn_backend().await;
        let client = ApiClient::new(&base).unwrap();
        match client.list_tasks().await {
            Err(ApiError::Unauthorized) => {}
            other => panic!("expected Unauthorized, got {other:?}"),
        }
        match client.delete_task("task-1").await {
            Err(ApiError::Unauthorized) => {}
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn login_sets_the_cookie_that_later_calls_carry() {
        let base = spawn_backend().await;
        let client = ApiClient::new(&base).unwrap();

        let user = client.login(&credentials()).await.unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.firstname, "Ada");

        // Same client, no explicit credential handling: the jar does it.
        assert!(client.list_tasks().await.unwrap().is_empty());
        client.logout().await.unwrap();
    }

    #[tokio::test]
    async fn login_failure_surfaces_the_backend_message() {
        let base = spawn_backend().await;
        let client = ApiClient::new(&base).unwrap();
        let err = client
            .login(&LoginRequest {
                email: "ada@example.com".into(),
                password: "wrong-password".into(),
            })
            .await
            .unwrap_err();
        match err {
            ApiError::Server { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn signup_returns_a_session_for_the_new_user() {
        let base = spawn_backend().await;
        let client = ApiClient::new(&base).unwrap();
        let user = client
            .signup(&SignupRequest {
                firstname: "Grace".into(),
                lastname: "Hopper".into(),
                email: "grace@example.com".into(),
                password: "difference".into(),
                confirm_password: "difference".into(),
            })
            .await
            .unwrap();
        assert_eq!(user.email, "grace@example.com");
        assert!(client.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_move_and_delete_round_trip() {
        let base = spawn_backend().await;
        let client = ApiClient::new(&base).unwrap();
        client.login(&credentials()).await.unwrap();

        // Add: the fixed placeholder draft, server assigns the id.
        let created = client
            .create_task(&TaskDraft {
                title: "New Task".into(),
                description: "New Description".into(),
                status: TaskStatus::ToDo,
                priority: TaskPriority::Medium,
                due_date: NaiveDate::from_ymd_opt(2026, 8, 6),
            })
            .await
            .unwrap();
        assert_eq!(created.id, "task-1");
        assert_eq!(created.status, TaskStatus::ToDo);

        let listed = client.list_tasks().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], created);

        // Drag from "To Do" to "Done": one PUT with the recomputed status.
        let moved = taskdeck::board::reclassify(&created, TaskStatus::Done).unwrap();
        let updated = client.update_task(&moved).await.unwrap();
        assert_eq!(updated.status, TaskStatus::Done);
        assert_eq!(updated.id, created.id);

        let listed = client.list_tasks().await.unwrap();
        assert_eq!(listed.len(), 1, "moving must not duplicate the task");
        assert_eq!(listed[0].status, TaskStatus::Done);

        // Delete: no task with that id remains.
        client.delete_task(&created.id).await.unwrap();
        assert!(client.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn updating_a_deleted_task_reports_the_server_error() {
        let base = spawn_backend().await;
        let client = ApiClient::new(&base).unwrap();
        client.login(&credentials()).await.unwrap();

        let ghost = taskdeck::api::models::Task {
            id: "task-99".into(),
            title: "gone".into(),
            description: String::new(),
            status: TaskStatus::ToDo,
            priority: TaskPriority::Low,
            due_date: None,
        };
        let err = client.update_task(&ghost).await.unwrap_err();
        match err {
            ApiError::Server { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Task not found");
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }
}

// =============================================================================
// CLI basics
// =============================================================================

mod cli_basics {
    use assert_cmd::Command;
    use predicates::prelude::*;

    fn taskdeck() -> Command {
        Command::cargo_bin("taskdeck").unwrap()
    }

    #[test]
    fn help_lists_the_subcommands() {
        taskdeck()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("board"))
            .stdout(predicate::str::contains("config"));
    }

    #[test]
    fn version_prints() {
        taskdeck().arg("--version").assert().success();
    }

    #[test]
    fn config_show_reports_the_resolved_api_url() {
        taskdeck()
            .env("TASKDECK_API_URL", "http://config-test:4444")
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("http://config-test:4444"));
    }
}

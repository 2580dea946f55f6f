#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use chrono::Duration;
use futures::future::BoxFuture;
use todo_api::config::Config;
use todo_api::db::{MemoryTodoRepository, TodoRepository};
use todo_api::models::{Todo, TodoInput};
use todo_api::{AppError, AppState};

pub const SECRET: &str = "integration-test-secret-0123456789";
pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

fn config(environment: &str) -> Config {
    Config::from_vars(|key| match key {
        "TODO_DB" => Some("postgres://unused".to_string()),
        "APP_SECRET" => Some(SECRET.to_string()),
        "APP_ENV" => Some(environment.to_string()),
        _ => None,
    })
    .expect("test configuration is valid")
}

pub fn state_with(environment: &str, repo: Arc<dyn TodoRepository>) -> AppState {
    AppState::new(&config(environment), repo).expect("test state builds")
}

/// Production-mode state over an empty in-memory store.
pub fn state() -> AppState {
    state_with("production", Arc::new(MemoryTodoRepository::new()))
}

pub fn dev_state() -> AppState {
    state_with("development", Arc::new(MemoryTodoRepository::new()))
}

/// `Authorization` header value for a freshly issued token.
pub fn bearer(state: &AppState, name: &str) -> String {
    let token = state
        .jwt
        .issue_token(name, Duration::hours(1))
        .expect("token issues");
    format!("Bearer {}", token)
}

/// Sends `req` through an initialised app and returns the status and JSON body.
pub async fn call_json(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    req: actix_http::Request,
) -> (StatusCode, serde_json::Value) {
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let bytes = test::read_body(resp).await;
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "{} response is not JSON ({}): {}",
            status,
            e,
            String::from_utf8_lossy(&bytes)
        )
    });
    (status, body)
}

/// A store whose every call fails the way an unreachable database would.
pub struct UnreachableStore;

fn refused<T: Send + 'static>() -> BoxFuture<'static, Result<T, AppError>> {
    Box::pin(async { Err(AppError::DatabaseError("connection refused".into())) })
}

impl TodoRepository for UnreachableStore {
    fn list(&self) -> BoxFuture<'_, Result<Vec<Todo>, AppError>> {
        refused()
    }

    fn find(&self, _id: i32) -> BoxFuture<'_, Result<Option<Todo>, AppError>> {
        refused()
    }

    fn create(&self, _input: TodoInput) -> BoxFuture<'_, Result<Todo, AppError>> {
        refused()
    }

    fn update(&self, _id: i32, _input: TodoInput) -> BoxFuture<'_, Result<Option<Todo>, AppError>> {
        refused()
    }

    fn delete(&self, _id: i32) -> BoxFuture<'_, Result<bool, AppError>> {
        refused()
    }
}

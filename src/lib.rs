#![doc = "The `todo_api` library crate."]
#![doc = ""]
#![doc = "Domain model, persistence context, bearer-token authentication, route table,"]
#![doc = "API documentation and the request pipeline for the Todo API. The binary"]
#![doc = "(`main.rs`) is only the composition root that wires these together."]

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod models;
pub mod redirect;
pub mod routes;

pub use app::{build_app, AppState};
pub use error::AppError;

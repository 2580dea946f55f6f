//! Persistence context for todos.
//!
//! Handlers only ever see `dyn TodoRepository`; the composition root decides
//! which store backs it.

pub mod memory;
pub mod postgres;

use futures::future::BoxFuture;

use crate::error::AppError;
use crate::models::{Todo, TodoInput};

pub use memory::MemoryTodoRepository;
pub use postgres::PgTodoRepository;

/// A mutable collection of todos backed by some store.
///
/// The store assigns ids on `create` and guarantees they are unique.
pub trait TodoRepository: Send + Sync {
    /// All todos ordered by id.
    fn list(&self) -> BoxFuture<'_, Result<Vec<Todo>, AppError>>;

    fn find(&self, id: i32) -> BoxFuture<'_, Result<Option<Todo>, AppError>>;

    fn create(&self, input: TodoInput) -> BoxFuture<'_, Result<Todo, AppError>>;

    /// Returns `None` when no todo has this id.
    fn update(&self, id: i32, input: TodoInput) -> BoxFuture<'_, Result<Option<Todo>, AppError>>;

    /// Returns `false` when no todo has this id.
    fn delete(&self, id: i32) -> BoxFuture<'_, Result<bool, AppError>>;
}

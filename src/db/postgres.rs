use futures::future::BoxFuture;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::TodoRepository;
use crate::error::AppError;
use crate::models::{Todo, TodoInput};

const TODO_COLUMNS: &str = "id, title, description, is_complete, created_at, updated_at";

/// `TodoRepository` over the `todos` table in PostgreSQL.
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool for the given connection string.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl TodoRepository for PgTodoRepository {
    fn list(&self) -> BoxFuture<'_, Result<Vec<Todo>, AppError>> {
        Box::pin(async move {
            let sql = format!("SELECT {} FROM todos ORDER BY id", TODO_COLUMNS);
            let todos = sqlx::query_as::<_, Todo>(&sql)
                .fetch_all(&self.pool)
                .await?;
            Ok(todos)
        })
    }

    fn find(&self, id: i32) -> BoxFuture<'_, Result<Option<Todo>, AppError>> {
        Box::pin(async move {
            let sql = format!("SELECT {} FROM todos WHERE id = $1", TODO_COLUMNS);
            let todo = sqlx::query_as::<_, Todo>(&sql)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(todo)
        })
    }

    fn create(&self, input: TodoInput) -> BoxFuture<'_, Result<Todo, AppError>> {
        Box::pin(async move {
            let sql = format!(
                "INSERT INTO todos (title, description, is_complete, created_at, updated_at) \
                 VALUES ($1, $2, $3, NOW(), NOW()) \
                 RETURNING {}",
                TODO_COLUMNS
            );
            let todo = sqlx::query_as::<_, Todo>(&sql)
                .bind(input.title)
                .bind(input.description)
                .bind(input.is_complete)
                .fetch_one(&self.pool)
                .await?;
            Ok(todo)
        })
    }

    fn update(&self, id: i32, input: TodoInput) -> BoxFuture<'_, Result<Option<Todo>, AppError>> {
        Box::pin(async move {
            let sql = format!(
                "UPDATE todos \
                 SET title = $1, description = $2, is_complete = $3, updated_at = NOW() \
                 WHERE id = $4 \
                 RETURNING {}",
                TODO_COLUMNS
            );
            let todo = sqlx::query_as::<_, Todo>(&sql)
                .bind(input.title)
                .bind(input.description)
                .bind(input.is_complete)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(todo)
        })
    }

    fn delete(&self, id: i32) -> BoxFuture<'_, Result<bool, AppError>> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM todos WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected() > 0)
        })
    }
}

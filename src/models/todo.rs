use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Payload for creating or replacing a todo.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    /// Short summary of the todo.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Optional free-text details, at most 1000 characters.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Completion flag. Treated as `false` when omitted.
    #[serde(default)]
    pub is_complete: bool,
}

/// A todo item as stored in the `todos` table and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Store-assigned identifier, never reused.
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Builds a fresh record for `id` from the submitted input.
    /// `created_at` and `updated_at` are both set to now.
    pub fn new(id: i32, input: TodoInput) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: input.title,
            description: input.description,
            is_complete: input.is_complete,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the mutable fields, keeping `id` and `created_at`.
    pub fn apply(&mut self, input: TodoInput) {
        self.title = input.title;
        self.description = input.description;
        self.is_complete = input.is_complete;
        self.updated_at = Utc::now();
    }
}

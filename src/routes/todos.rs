use actix_web::{http::header, web, HttpResponse, Responder};
use validator::Validate;

use crate::{
    auth::AuthenticatedUser,
    db::TodoRepository,
    error::AppError,
    models::{Todo, TodoInput},
};

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Todo {} not found", id))
}

/// Lists every todo.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Todo` objects ordered by id.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[utoipa::path(
    get,
    path = "/api/todo",
    tag = "Todo",
    responses(
        (status = 200, description = "All todos", body = [Todo]),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn list_todos(
    repo: web::Data<dyn TodoRepository>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let todos = repo.list().await?;
    Ok(HttpResponse::Ok().json(todos))
}

/// Creates a todo. The store assigns the id.
///
/// ## Responses:
/// - `201 Created`: the new `Todo`, with a `Location` header pointing at it.
/// - `400 Bad Request`: body is not valid JSON or fails validation.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[utoipa::path(
    post,
    path = "/api/todo",
    tag = "Todo",
    request_body = TodoInput,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 400, description = "Malformed or invalid body"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn create_todo(
    repo: web::Data<dyn TodoRepository>,
    user: AuthenticatedUser,
    todo_data: web::Json<TodoInput>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let todo = repo.create(todo_data.into_inner()).await?;
    log::info!("{} created todo {}", user.name, todo.id);

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/todo/{}", todo.id)))
        .json(todo))
}

/// Fetches one todo by id.
///
/// ## Responses:
/// - `200 OK`: the `Todo`.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no todo with this id.
#[utoipa::path(
    get,
    path = "/api/todo/{id}",
    tag = "Todo",
    params(("id" = i32, Path, description = "Todo id")),
    responses(
        (status = 200, description = "Todo found", body = Todo),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Todo not found")
    )
)]
pub async fn get_todo(
    repo: web::Data<dyn TodoRepository>,
    _user: AuthenticatedUser,
    todo_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let id = todo_id.into_inner();
    match repo.find(id).await? {
        Some(todo) => Ok(HttpResponse::Ok().json(todo)),
        None => Err(not_found(id)),
    }
}

/// Replaces the title, description and completion flag of a todo.
///
/// ## Responses:
/// - `200 OK`: the updated `Todo`.
/// - `400 Bad Request`: body is not valid JSON or fails validation.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no todo with this id.
#[utoipa::path(
    put,
    path = "/api/todo/{id}",
    tag = "Todo",
    params(("id" = i32, Path, description = "Todo id")),
    request_body = TodoInput,
    responses(
        (status = 200, description = "Todo updated", body = Todo),
        (status = 400, description = "Malformed or invalid body"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Todo not found")
    )
)]
pub async fn update_todo(
    repo: web::Data<dyn TodoRepository>,
    user: AuthenticatedUser,
    todo_id: web::Path<i32>,
    todo_data: web::Json<TodoInput>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;
    let id = todo_id.into_inner();

    match repo.update(id, todo_data.into_inner()).await? {
        Some(todo) => {
            log::info!("{} updated todo {}", user.name, id);
            Ok(HttpResponse::Ok().json(todo))
        }
        None => Err(not_found(id)),
    }
}

/// Deletes a todo.
///
/// ## Responses:
/// - `204 No Content`: deleted.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no todo with this id (including one already deleted).
#[utoipa::path(
    delete,
    path = "/api/todo/{id}",
    tag = "Todo",
    params(("id" = i32, Path, description = "Todo id")),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Todo not found")
    )
)]
pub async fn delete_todo(
    repo: web::Data<dyn TodoRepository>,
    user: AuthenticatedUser,
    todo_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let id = todo_id.into_inner();

    if !repo.delete(id).await? {
        return Err(not_found(id));
    }
    log::info!("{} deleted todo {}", user.name, id);

    Ok(HttpResponse::NoContent().finish())
}

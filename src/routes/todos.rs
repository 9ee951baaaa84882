use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{ApiResponse, CreateTodoRequest, TodoPatch, UpdateTodoRequest},
    pagination::PaginationQuery,
    services::TodoService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Lists the authenticated user's todos.
///
/// ## Query Parameters:
/// - `page` (optional, default 1): 1-based page number.
/// - `page_size` (optional, default 10): between 1 and 100.
///
/// ## Responses:
/// - `200 OK`: `{ data: [Todo], pagination }`, newest first.
/// - `400 Bad Request`: invalid pagination parameters.
/// - `401 Unauthorized`: missing or invalid token.
#[get("")]
pub async fn list_todos(
    identity: AuthenticatedUser,
    todos: web::Data<TodoService>,
    query: web::Query<PaginationQuery>,
) -> Result<impl Responder, AppError> {
    query.validate()?;

    let page = todos.list_mine(identity.user_id, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(page)))
}

/// Creates a new todo owned by the authenticated user.
///
/// The owner is always the caller and `completed` always starts as `false`,
/// whatever the body says.
///
/// ## Responses:
/// - `201 Created`: the new `Todo`.
/// - `400 Bad Request`: malformed JSON or a title outside 1..=200 characters.
/// - `401 Unauthorized`: missing or invalid token.
#[post("")]
pub async fn create_todo(
    identity: AuthenticatedUser,
    todos: web::Data<TodoService>,
    todo_data: web::Json<CreateTodoRequest>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let todo = todos.create(identity.user_id, todo_data.into_inner()).await?;
    log::info!("user {} created todo {}", identity.user_id, todo.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(todo)))
}

/// Retrieves one of the caller's todos.
///
/// A todo owned by someone else is reported as `404`, the same as a missing one.
#[get("/{id}")]
pub async fn get_todo(
    identity: AuthenticatedUser,
    todos: web::Data<TodoService>,
    todo_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let todo = todos.get(identity.user_id, todo_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(todo)))
}

/// Updates one of the caller's todos with merge-patch semantics.
///
/// Only supplied, non-empty fields change; `"description": ""` leaves the stored
/// description as it was.
#[put("/{id}")]
pub async fn update_todo(
    identity: AuthenticatedUser,
    todos: web::Data<TodoService>,
    todo_id: web::Path<Uuid>,
    todo_data: web::Json<UpdateTodoRequest>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let patch = TodoPatch::from(todo_data.into_inner());
    let todo = todos
        .update(identity.user_id, todo_id.into_inner(), patch)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(todo)))
}

/// Deletes one of the caller's todos.
///
/// ## Responses:
/// - `204 No Content`: on successful deletion.
/// - `404 Not Found`: no such todo for this user, including one already deleted.
#[delete("/{id}")]
pub async fn delete_todo(
    identity: AuthenticatedUser,
    todos: web::Data<TodoService>,
    todo_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let todo_uuid = todo_id.into_inner();
    todos.delete(identity.user_id, todo_uuid).await?;
    log::info!("user {} deleted todo {}", identity.user_id, todo_uuid);
    Ok(HttpResponse::NoContent().finish())
}

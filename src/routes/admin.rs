//! Listing endpoints across all users. Any authenticated caller may use them; there
//! are no roles.

use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::ApiResponse,
    pagination::PaginationQuery,
    services::{TodoService, UserService},
};
use actix_web::{get, web, HttpResponse, Responder};
use validator::Validate;

#[get("/todos")]
pub async fn list_all_todos(
    _identity: AuthenticatedUser,
    todos: web::Data<TodoService>,
    query: web::Query<PaginationQuery>,
) -> Result<impl Responder, AppError> {
    query.validate()?;

    let page = todos.list_all(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(page)))
}

#[get("/users")]
pub async fn list_all_users(
    _identity: AuthenticatedUser,
    users: web::Data<UserService>,
    query: web::Query<PaginationQuery>,
) -> Result<impl Responder, AppError> {
    query.validate()?;

    let page = users.list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(page)))
}

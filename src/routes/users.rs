use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{ApiResponse, UpdateUserRequest, UserPatch},
    services::UserService,
};
use actix_web::{delete, get, put, web, HttpResponse, Responder};
use validator::Validate;

/// Returns the account behind the current token.
#[get("/me")]
pub async fn get_me(
    identity: AuthenticatedUser,
    users: web::Data<UserService>,
) -> Result<impl Responder, AppError> {
    let user = users.get(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

/// Updates the caller's name and/or email. Empty fields are left unchanged.
///
/// Tokens already issued keep carrying the old email until they expire.
#[put("/me")]
pub async fn update_me(
    identity: AuthenticatedUser,
    users: web::Data<UserService>,
    user_data: web::Json<UpdateUserRequest>,
) -> Result<impl Responder, AppError> {
    user_data.validate()?;

    let user = users
        .update(identity.user_id, UserPatch::from(user_data.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

/// Deletes the caller's account together with all of its todos.
#[delete("/me")]
pub async fn delete_me(
    identity: AuthenticatedUser,
    users: web::Data<UserService>,
) -> Result<impl Responder, AppError> {
    users.delete(identity.user_id).await?;
    log::info!("user {} deleted their account", identity.user_id);
    Ok(HttpResponse::NoContent().finish())
}

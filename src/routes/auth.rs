use crate::{
    auth::{AuthService, AuthenticatedUser, LoginRequest, TokenResponse},
    error::AppError,
    models::{ApiResponse, CreateUserRequest},
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Login user
///
/// Checks the email/password pair and returns a session token plus the user.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let response = auth.login(&login_data).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Register a new user
///
/// Creates a new account and returns a session token for it.
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    register_data: web::Json<CreateUserRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let response = auth.register(register_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(response)))
}

/// Refresh token
///
/// Reissues a token for the identity carried by the current, still valid, token.
#[post("/refresh")]
pub async fn refresh(
    identity: AuthenticatedUser,
    auth: web::Data<AuthService>,
) -> Result<impl Responder, AppError> {
    let token = auth.refresh(&identity)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(TokenResponse { token })))
}

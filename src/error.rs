//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure is classified once into one of a fixed set of variants, each of which
//! maps to exactly one wire error code and one HTTP status.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can return it
//! directly; the response body is always the standard `{ success, error }` envelope.
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error` and `bcrypt::BcryptError` allow use of the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;
use validator::ValidationErrors;

use crate::models::response::ApiResponse;

/// Wire error codes returned inside the error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidRequest,
    Unauthorized,
    InvalidCredentials,
    TodoNotFound,
    UserNotFound,
    EmailExists,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::TodoNotFound => "TODO_NOT_FOUND",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::EmailExists => "EMAIL_EXISTS",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Malformed input: bad JSON, failed field validation, unparseable identifier (HTTP 400).
    InvalidRequest(String),
    /// Missing or malformed auth header, invalid or expired token (HTTP 401).
    Unauthorized(String),
    /// Login email/password mismatch (HTTP 401).
    InvalidCredentials,
    /// The targeted todo does not exist, or is not visible to the caller (HTTP 404).
    TodoNotFound,
    /// The targeted user does not exist (HTTP 404).
    UserNotFound,
    /// Another user already owns this email address (HTTP 409).
    EmailExists,
    /// Persistence, signing or hashing failure not attributable to the caller (HTTP 500).
    /// The message is logged but never sent to the client.
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidRequest(_) => ErrorCode::InvalidRequest,
            AppError::Unauthorized(_) => ErrorCode::Unauthorized,
            AppError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AppError::TodoNotFound => ErrorCode::TodoNotFound,
            AppError::UserNotFound => ErrorCode::UserNotFound,
            AppError::EmailExists => ErrorCode::EmailExists,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// The message exposed to the caller.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidRequest(msg) | AppError::Unauthorized(msg) => msg.clone(),
            AppError::InvalidCredentials => "Invalid email or password".into(),
            AppError::TodoNotFound => "Todo not found".into(),
            AppError::UserNotFound => "User not found".into(),
            AppError::EmailExists => "Email already registered".into(),
            AppError::Internal(_) => "Internal server error".into(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::InvalidRequest(msg) => write!(f, "Invalid Request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::TodoNotFound => write!(f, "Not Found: todo"),
            AppError::UserNotFound => write!(f, "Not Found: user"),
            AppError::EmailExists => write!(f, "Conflict: email already registered"),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into enveloped `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::TodoNotFound | AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::EmailExists => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            log::error!("internal error: {}", detail);
        }
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::failure(
            self.code(),
            self.public_message(),
        ))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// Not-found and uniqueness conditions are classified by the repositories, which know
/// which entity they are working on, so everything reaching this conversion is internal.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::Internal(format!("database error: {}", error))
    }
}

/// Field validation failures are caller errors.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::InvalidRequest(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
///
/// Signing failures are handled separately by the token authority and reported as
/// internal errors; this conversion is for the verification path.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(format!("password hashing error: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_error_statuses() {
        let cases = vec![
            (AppError::InvalidRequest("bad".into()), 400),
            (AppError::Unauthorized("Invalid token".into()), 401),
            (AppError::InvalidCredentials, 401),
            (AppError::TodoNotFound, 404),
            (AppError::UserNotFound, 404),
            (AppError::EmailExists, 409),
            (AppError::Internal("db down".into()), 500),
        ];

        for (error, status) in cases {
            assert_eq!(error.error_response().status(), status, "{:?}", error);
        }
    }

    #[actix_rt::test]
    async fn test_error_envelope_hides_internal_detail() {
        let response = AppError::Internal("connection refused on 10.0.0.5".into()).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"]["message"], "Internal server error");
        assert!(json.get("data").is_none());
    }

    #[actix_rt::test]
    async fn test_not_found_codes_are_entity_specific() {
        let response = AppError::TodoNotFound.error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "TODO_NOT_FOUND");

        assert_eq!(AppError::UserNotFound.code().as_str(), "USER_NOT_FOUND");
    }
}

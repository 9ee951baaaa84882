use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use uuid::Uuid;

use super::token::{Claims, TokenAuthority};
use crate::error::AppError;

/// The identity of the caller, established from a validated bearer token.
///
/// Protected handlers take this as an argument; extraction fails with
/// `AppError::Unauthorized` before the handler runs if the request carries no valid token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
        }
    }
}

/// Parses an `Authorization` header value and validates the bearer token it carries.
pub fn authenticate_bearer(
    tokens: &TokenAuthority,
    header: Option<&str>,
) -> Result<AuthenticatedUser, AppError> {
    let header = header
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Authorization header is required".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".into()))?
        .trim();

    if token.is_empty() {
        return Err(AppError::Unauthorized("Token is required".into()));
    }

    tokens
        .validate_token(token)
        .map(AuthenticatedUser::from)
        .map_err(|e| {
            log::debug!("rejected bearer token: {}", e);
            AppError::Unauthorized("Invalid token".into())
        })
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let tokens = match req.app_data::<web::Data<TokenAuthority>>() {
            Some(tokens) => tokens,
            None => {
                let err = AppError::Internal("TokenAuthority is not registered as app data".into());
                return ready(Err(err.into()));
            }
        };

        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        ready(authenticate_bearer(tokens, header).map_err(ActixError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    fn tokens() -> web::Data<TokenAuthority> {
        web::Data::new(TokenAuthority::new(&JwtConfig {
            secret: "extractor-secret".to_string(),
            expiry: chrono::Duration::minutes(10),
        }))
    }

    fn unauthorized_message(result: Result<AuthenticatedUser, AppError>) -> String {
        match result {
            Err(AppError::Unauthorized(msg)) => msg,
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_bearer_header_errors() {
        let tokens = tokens();
        assert_eq!(
            unauthorized_message(authenticate_bearer(&tokens, None)),
            "Authorization header is required"
        );
        assert_eq!(
            unauthorized_message(authenticate_bearer(&tokens, Some("Basic abc"))),
            "Invalid authorization header format"
        );
        assert_eq!(
            unauthorized_message(authenticate_bearer(&tokens, Some("Bearer "))),
            "Token is required"
        );
        assert_eq!(
            unauthorized_message(authenticate_bearer(&tokens, Some("Bearer garbage"))),
            "Invalid token"
        );
    }

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_success() {
        let tokens = tokens();
        let user_id = Uuid::new_v4();
        let token = tokens.issue_token(user_id, "a@x.com").unwrap();

        let req = TestRequest::default()
            .app_data(tokens.clone())
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();

        let mut payload = Payload::None;
        let user = AuthenticatedUser::from_request(&req, &mut payload)
            .await
            .unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.email, "a@x.com");
    }

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_failure() {
        let req = TestRequest::default()
            .app_data(tokens())
            .to_http_request();

        let mut payload = Payload::None;
        let err = AuthenticatedUser::from_request(&req, &mut payload)
            .await
            .unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }
}

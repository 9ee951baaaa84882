use std::sync::Arc;

use super::extractors::AuthenticatedUser;
use super::password::verify_password;
use super::token::TokenAuthority;
use super::{LoginRequest, LoginResponse};
use crate::error::AppError;
use crate::models::CreateUserRequest;
use crate::services::UserService;

/// Credential checks and token issuance on top of the user store.
#[derive(Clone)]
pub struct AuthService {
    users: UserService,
    tokens: Arc<TokenAuthority>,
}

impl AuthService {
    pub fn new(users: UserService, tokens: Arc<TokenAuthority>) -> Self {
        Self { users, tokens }
    }

    /// Looks the user up by email and checks the password.
    ///
    /// An unknown email and a wrong password are reported identically.
    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, AppError> {
        let user = match self.users.find_by_email(&req.email).await? {
            Some(user) => user,
            None => {
                log::info!("login rejected: unknown email");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !verify_password(&req.password, &user.password_hash)? {
            log::info!("login rejected: bad password for user {}", user.id);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue_token(user.id, &user.email)?;
        Ok(LoginResponse { token, user })
    }

    /// Creates an account and signs the new user in.
    pub async fn register(&self, req: CreateUserRequest) -> Result<LoginResponse, AppError> {
        let user = self.users.create(req).await?;
        let token = self.tokens.issue_token(user.id, &user.email)?;
        log::info!("registered user {}", user.id);
        Ok(LoginResponse { token, user })
    }

    /// Reissues a token from an already validated identity.
    pub fn refresh(&self, identity: &AuthenticatedUser) -> Result<String, AppError> {
        self.tokens.issue_token(identity.user_id, &identity.email)
    }
}

//! Shared application state and the function that mounts it onto an actix `App`.

use actix_web::web;
use std::sync::Arc;

use crate::auth::{AuthService, TokenAuthority};
use crate::config::JwtConfig;
use crate::repository::{MemoryStore, TodoRepository, UserRepository};
use crate::routes;
use crate::services::{TodoService, UserService};

/// Everything a worker needs to serve requests. Built once at startup; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenAuthority>,
    pub auth: AuthService,
    pub users: UserService,
    pub todos: TodoService,
}

impl AppState {
    pub fn new(
        jwt: &JwtConfig,
        bcrypt_cost: u32,
        user_repo: Arc<dyn UserRepository>,
        todo_repo: Arc<dyn TodoRepository>,
    ) -> Self {
        let tokens = Arc::new(TokenAuthority::new(jwt));
        let users = UserService::new(user_repo, bcrypt_cost);
        let todos = TodoService::new(todo_repo);
        let auth = AuthService::new(users.clone(), tokens.clone());

        Self {
            tokens,
            auth,
            users,
            todos,
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(jwt: &JwtConfig, bcrypt_cost: u32) -> Self {
        let store = MemoryStore::new();
        Self::new(
            jwt,
            bcrypt_cost,
            Arc::new(store.users()),
            Arc::new(store.todos()),
        )
    }

    /// Registers the shared state, the extractor error handlers, `/health` and the
    /// `/api/v1` routes.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.tokens.clone()))
            .app_data(web::Data::new(self.auth.clone()))
            .app_data(web::Data::new(self.users.clone()))
            .app_data(web::Data::new(self.todos.clone()))
            .configure(routes::extractor_config)
            .service(routes::health::health)
            .service(web::scope("/api/v1").configure(routes::config));
    }
}

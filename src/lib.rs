#![doc = "The `todo_api` library crate."]
#![doc = ""]
#![doc = "Authentication (credential checks, session tokens), the ownership-scoped user and"]
#![doc = "todo stores, pagination, routing and error handling for the todo backend. The"]
#![doc = "`todo-api` binary builds an `AppState` from `Config` and serves it with actix-web."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;

pub use crate::config::Config;
pub use crate::error::AppError;
pub use crate::state::AppState;

//! Storage backend selection and PostgreSQL pool setup.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::AppError;
use crate::repository::{PgTodoRepository, PgUserRepository};
use crate::state::AppState;

/// Connects to PostgreSQL and applies the embedded migrations.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to run migrations: {}", e)))?;

    Ok(pool)
}

/// Builds the application state on PostgreSQL when `DATABASE_URL` is set, otherwise on
/// the in-memory store.
pub async fn build_state(config: &Config) -> Result<AppState, AppError> {
    match &config.database_url {
        Some(url) => {
            let pool = connect(url, config.database_max_connections).await?;
            log::info!("using PostgreSQL storage");
            Ok(AppState::new(
                &config.jwt,
                config.bcrypt_cost,
                Arc::new(PgUserRepository::new(pool.clone())),
                Arc::new(PgTodoRepository::new(pool)),
            ))
        }
        None => {
            log::warn!("DATABASE_URL not set; using in-memory storage, data will not persist");
            Ok(AppState::in_memory(&config.jwt, config.bcrypt_cost))
        }
    }
}

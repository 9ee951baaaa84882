use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Page, Repository, TodoRepository, UserRepository};
use crate::error::AppError;
use crate::models::{NewTodo, NewUser, Todo, TodoPatch, User, UserPatch};
use crate::pagination::PaginationQuery;

const USER_COLUMNS: &str = "id, email, name, password_hash, created_at, updated_at";
const TODO_COLUMNS: &str = "id, title, description, completed, user_id, created_at, updated_at";

/// Maps constraint violations on the `users` table to caller-facing errors.
fn classify_user_error(error: sqlx::Error) -> AppError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::EmailExists,
        _ => error.into(),
    }
}

/// A todo insert referencing a missing user violates the owner foreign key.
fn classify_todo_error(error: sqlx::Error) -> AppError {
    match &error {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => AppError::UserNotFound,
        _ => error.into(),
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgUserRepository {
    type Record = User;
    type New = NewUser;
    type Patch = UserPatch;

    async fn create(&self, new: NewUser) -> Result<User, AppError> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO users (id, email, name, password_hash, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&new.email)
            .bind(&new.name)
            .bind(&new.password_hash)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_user_error)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, AppError> {
        let sql = format!(
            "UPDATE users \
             SET name = COALESCE(NULLIF($2, ''), name), \
                 email = COALESCE(NULLIF($3, ''), email), \
                 updated_at = $4 \
             WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.email)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(classify_user_error)?
            .ok_or(AppError::UserNotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }

    async fn list(&self, page: PaginationQuery) -> Result<Page<User>, AppError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        let window = page.window();
        let sql = format!(
            "SELECT {} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            USER_COLUMNS
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((users, total))
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }
}

#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgTodoRepository {
    type Record = Todo;
    type New = NewTodo;
    type Patch = TodoPatch;

    async fn create(&self, new: NewTodo) -> Result<Todo, AppError> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO todos (id, title, description, completed, user_id, created_at, updated_at) \
             VALUES ($1, $2, $3, FALSE, $4, $5, $6) RETURNING {}",
            TODO_COLUMNS
        );
        sqlx::query_as::<_, Todo>(&sql)
            .bind(Uuid::new_v4())
            .bind(&new.title)
            .bind(&new.description)
            .bind(new.user_id)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_todo_error)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Todo, AppError> {
        let sql = format!("SELECT {} FROM todos WHERE id = $1", TODO_COLUMNS);
        sqlx::query_as::<_, Todo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::TodoNotFound)
    }

    async fn update(&self, id: Uuid, patch: TodoPatch) -> Result<Todo, AppError> {
        let sql = format!(
            "UPDATE todos \
             SET title = COALESCE(NULLIF($2, ''), title), \
                 description = COALESCE(NULLIF($3, ''), description), \
                 completed = COALESCE($4, completed), \
                 updated_at = $5 \
             WHERE id = $1 RETURNING {}",
            TODO_COLUMNS
        );
        sqlx::query_as::<_, Todo>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.description)
            .bind(patch.completed)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::TodoNotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::TodoNotFound);
        }
        Ok(())
    }

    async fn list(&self, page: PaginationQuery) -> Result<Page<Todo>, AppError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos")
            .fetch_one(&self.pool)
            .await?;

        let window = page.window();
        let sql = format!(
            "SELECT {} FROM todos ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            TODO_COLUMNS
        );
        let todos = sqlx::query_as::<_, Todo>(&sql)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((todos, total))
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn list_by_owner(
        &self,
        owner: Uuid,
        page: PaginationQuery,
    ) -> Result<Page<Todo>, AppError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos WHERE user_id = $1")
            .bind(owner)
            .fetch_one(&self.pool)
            .await?;

        let window = page.window();
        let sql = format!(
            "SELECT {} FROM todos WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            TODO_COLUMNS
        );
        let todos = sqlx::query_as::<_, Todo>(&sql)
            .bind(owner)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((todos, total))
    }
}

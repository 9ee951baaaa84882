//! Persistence for users and todos.
//!
//! `Repository` is the CRUD + paginated listing contract shared by both entities. The
//! entity-specific traits add the lookups each one needs. Every trait has a PostgreSQL
//! implementation (`postgres`) and an in-memory one (`memory`).

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewTodo, NewUser, Todo, TodoPatch, User, UserPatch};
use crate::pagination::PaginationQuery;

pub use memory::MemoryStore;
pub use postgres::{PgTodoRepository, PgUserRepository};

/// A page of rows plus the total row count of the (possibly scoped) listing.
pub type Page<T> = (Vec<T>, i64);

#[async_trait]
pub trait Repository: Send + Sync {
    type Record: Send;
    type New: Send;
    type Patch: Send;

    /// Assigns a new id, stamps both timestamps with the current time and persists.
    async fn create(&self, new: Self::New) -> Result<Self::Record, AppError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Self::Record, AppError>;

    /// Applies only the fields present in `patch` and always refreshes `updated_at`.
    async fn update(&self, id: Uuid, patch: Self::Patch) -> Result<Self::Record, AppError>;

    /// Fails with the entity's not-found error when no row was removed.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    /// Unscoped listing, newest first.
    async fn list(&self, page: PaginationQuery) -> Result<Page<Self::Record>, AppError>;
}

#[async_trait]
pub trait UserRepository: Repository<Record = User, New = NewUser, Patch = UserPatch> {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait TodoRepository: Repository<Record = Todo, New = NewTodo, Patch = TodoPatch> {
    /// Listing restricted to todos owned by `owner`, newest first. The total is the
    /// owner-scoped count.
    async fn list_by_owner(
        &self,
        owner: Uuid,
        page: PaginationQuery,
    ) -> Result<Page<Todo>, AppError>;
}

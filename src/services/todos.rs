use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{CreateTodoRequest, NewTodo, Todo, TodoPatch};
use crate::pagination::{Paginated, PaginationQuery};
use crate::repository::TodoRepository;

/// Todo operations on behalf of an authenticated owner.
///
/// Single-todo operations only see the caller's own todos: a todo owned by someone
/// else is reported as `TodoNotFound`, the same as one that does not exist.
#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    /// Creates a todo owned by `owner`. New todos always start uncompleted.
    pub async fn create(&self, owner: Uuid, req: CreateTodoRequest) -> Result<Todo, AppError> {
        self.repo.create(NewTodo::new(req, owner)).await
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Todo, AppError> {
        let todo = self.repo.get_by_id(id).await?;
        if todo.user_id != owner {
            return Err(AppError::TodoNotFound);
        }
        Ok(todo)
    }

    pub async fn update(&self, owner: Uuid, id: Uuid, patch: TodoPatch) -> Result<Todo, AppError> {
        self.get(owner, id).await?;
        self.repo.update(id, patch).await
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), AppError> {
        self.get(owner, id).await?;
        self.repo.delete(id).await
    }

    /// The caller's todos, newest first.
    pub async fn list_mine(
        &self,
        owner: Uuid,
        page: PaginationQuery,
    ) -> Result<Paginated<Todo>, AppError> {
        let (todos, total) = self.repo.list_by_owner(owner, page).await?;
        Ok(Paginated::new(todos, page, total))
    }

    /// Every todo in the system, newest first. Callers only need to be authenticated.
    pub async fn list_all(&self, page: PaginationQuery) -> Result<Paginated<Todo>, AppError> {
        let (todos, total) = self.repo.list(page).await?;
        Ok(Paginated::new(todos, page, total))
    }
}

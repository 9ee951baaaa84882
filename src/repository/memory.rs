//! In-memory backend, used when no database is configured and by the test suite.
//!
//! Both repositories share one set of tables so that deleting a user removes their
//! todos, matching the `ON DELETE CASCADE` of the SQL schema.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Page, Repository, TodoRepository, UserRepository};
use crate::error::AppError;
use crate::models::{NewTodo, NewUser, Todo, TodoPatch, User, UserPatch};
use crate::pagination::PaginationQuery;

#[derive(Default)]
struct Tables {
    // Insertion order, oldest first.
    users: Vec<User>,
    todos: Vec<Todo>,
}

/// Shared tables behind the in-memory user and todo repositories.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> MemoryUserRepository {
        MemoryUserRepository {
            store: self.clone(),
        }
    }

    pub fn todos(&self) -> MemoryTodoRepository {
        MemoryTodoRepository {
            store: self.clone(),
        }
    }
}

/// Newest first; rows with equal timestamps keep reverse insertion order.
fn newest_first<'a, T, I, F>(rows: I, created_at: F) -> Vec<T>
where
    T: Clone + 'a,
    I: DoubleEndedIterator<Item = &'a T>,
    F: Fn(&T) -> chrono::DateTime<Utc>,
{
    let mut sorted: Vec<T> = rows.rev().cloned().collect();
    sorted.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    sorted
}

fn page_of<T>(rows: Vec<T>, page: PaginationQuery) -> Page<T> {
    let total = rows.len() as i64;
    let window = page.window();
    let data = rows
        .into_iter()
        .skip(window.offset as usize)
        .take(window.limit as usize)
        .collect();
    (data, total)
}

#[derive(Clone)]
pub struct MemoryUserRepository {
    store: MemoryStore,
}

#[async_trait]
impl Repository for MemoryUserRepository {
    type Record = User;
    type New = NewUser;
    type Patch = UserPatch;

    async fn create(&self, new: NewUser) -> Result<User, AppError> {
        let mut tables = self.store.tables.write().await;
        if tables.users.iter().any(|u| u.email == new.email) {
            return Err(AppError::EmailExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: new.email,
            name: new.name,
            password_hash: new.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, AppError> {
        let tables = self.store.tables.read().await;
        tables
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(AppError::UserNotFound)
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, AppError> {
        let mut tables = self.store.tables.write().await;
        let index = tables
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(AppError::UserNotFound)?;

        if let Some(email) = patch.email.as_deref().filter(|e| !e.is_empty()) {
            if tables.users.iter().any(|u| u.id != id && u.email == email) {
                return Err(AppError::EmailExists);
            }
        }

        let user = &mut tables.users[index];

        if let Some(name) = patch.name.filter(|n| !n.is_empty()) {
            user.name = name;
        }
        if let Some(email) = patch.email.filter(|e| !e.is_empty()) {
            user.email = email;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tables = self.store.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Err(AppError::UserNotFound);
        }
        tables.todos.retain(|t| t.user_id != id);
        Ok(())
    }

    async fn list(&self, page: PaginationQuery) -> Result<Page<User>, AppError> {
        let tables = self.store.tables.read().await;
        let rows = newest_first(tables.users.iter(), |u: &User| u.created_at);
        Ok(page_of(rows, page))
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }
}

#[derive(Clone)]
pub struct MemoryTodoRepository {
    store: MemoryStore,
}

#[async_trait]
impl Repository for MemoryTodoRepository {
    type Record = Todo;
    type New = NewTodo;
    type Patch = TodoPatch;

    async fn create(&self, new: NewTodo) -> Result<Todo, AppError> {
        let mut tables = self.store.tables.write().await;
        if !tables.users.iter().any(|u| u.id == new.user_id) {
            return Err(AppError::UserNotFound);
        }

        let now = Utc::now();
        let todo = Todo {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            completed: false,
            user_id: new.user_id,
            created_at: now,
            updated_at: now,
        };
        tables.todos.push(todo.clone());
        Ok(todo)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Todo, AppError> {
        let tables = self.store.tables.read().await;
        tables
            .todos
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(AppError::TodoNotFound)
    }

    async fn update(&self, id: Uuid, patch: TodoPatch) -> Result<Todo, AppError> {
        let mut tables = self.store.tables.write().await;
        let todo = tables
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(AppError::TodoNotFound)?;

        if let Some(title) = patch.title.filter(|t| !t.is_empty()) {
            todo.title = title;
        }
        if let Some(description) = patch.description.filter(|d| !d.is_empty()) {
            todo.description = Some(description);
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        todo.updated_at = Utc::now();
        Ok(todo.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tables = self.store.tables.write().await;
        let before = tables.todos.len();
        tables.todos.retain(|t| t.id != id);
        if tables.todos.len() == before {
            return Err(AppError::TodoNotFound);
        }
        Ok(())
    }

    async fn list(&self, page: PaginationQuery) -> Result<Page<Todo>, AppError> {
        let tables = self.store.tables.read().await;
        let rows = newest_first(tables.todos.iter(), |t: &Todo| t.created_at);
        Ok(page_of(rows, page))
    }
}

#[async_trait]
impl TodoRepository for MemoryTodoRepository {
    async fn list_by_owner(
        &self,
        owner: Uuid,
        page: PaginationQuery,
    ) -> Result<Page<Todo>, AppError> {
        let tables = self.store.tables.read().await;
        let owned: Vec<&Todo> = tables.todos.iter().filter(|t| t.user_id == owner).collect();
        let rows = newest_first(owned.into_iter(), |t: &Todo| t.created_at);
        Ok(page_of(rows, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn user(store: &MemoryStore, email: &str) -> User {
        store
            .users()
            .create(NewUser {
                email: email.to_string(),
                name: "Test".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
    }

    async fn todo(store: &MemoryStore, owner: Uuid, title: &str) -> Todo {
        store
            .todos()
            .create(NewTodo {
                title: title.to_string(),
                description: Some("desc".to_string()),
                user_id: owner,
            })
            .await
            .unwrap()
    }

    #[actix_rt::test]
    async fn test_create_stamps_and_defaults() {
        let store = MemoryStore::new();
        let owner = user(&store, "a@x.com").await;
        let created = todo(&store, owner.id, "T1").await;

        assert!(!created.completed);
        assert_eq!(created.user_id, owner.id);
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(store.todos().get_by_id(created.id).await.unwrap().title, "T1");
    }

    #[actix_rt::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        user(&store, "a@x.com").await;

        let err = store
            .users()
            .create(NewUser {
                email: "a@x.com".to_string(),
                name: "Other".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmailExists));
    }

    #[actix_rt::test]
    async fn test_update_email_conflict() {
        let store = MemoryStore::new();
        user(&store, "a@x.com").await;
        let b = user(&store, "b@x.com").await;

        let err = store
            .users()
            .update(
                b.id,
                UserPatch {
                    email: Some("a@x.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmailExists));
    }

    #[actix_rt::test]
    async fn test_update_missing_user_is_not_found_even_with_taken_email() {
        let store = MemoryStore::new();
        user(&store, "a@x.com").await;

        let err = store
            .users()
            .update(
                Uuid::new_v4(),
                UserPatch {
                    email: Some("a@x.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }

    #[actix_rt::test]
    async fn test_todo_for_missing_owner_rejected() {
        let store = MemoryStore::new();
        let err = store
            .todos()
            .create(NewTodo {
                title: "orphan".to_string(),
                description: None,
                user_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }

    #[actix_rt::test]
    async fn test_update_merge_patch() {
        let store = MemoryStore::new();
        let owner = user(&store, "a@x.com").await;
        let created = todo(&store, owner.id, "T1").await;

        let updated = store
            .todos()
            .update(
                created.id,
                TodoPatch {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.completed);
        assert_eq!(updated.title, "T1");
        assert_eq!(updated.description.as_deref(), Some("desc"));
        assert!(updated.updated_at >= created.updated_at);

        let err = store
            .todos()
            .update(Uuid::new_v4(), TodoPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::TodoNotFound));
    }

    #[actix_rt::test]
    async fn test_delete_twice_is_not_found() {
        let store = MemoryStore::new();
        let owner = user(&store, "a@x.com").await;
        let created = todo(&store, owner.id, "T1").await;

        store.todos().delete(created.id).await.unwrap();
        for _ in 0..2 {
            assert!(matches!(
                store.todos().delete(created.id).await,
                Err(AppError::TodoNotFound)
            ));
        }
    }

    #[actix_rt::test]
    async fn test_list_by_owner_is_scoped_and_newest_first() {
        let store = MemoryStore::new();
        let u1 = user(&store, "a@x.com").await;
        let u2 = user(&store, "b@x.com").await;

        for title in ["first", "second", "third"] {
            todo(&store, u1.id, title).await;
        }
        todo(&store, u2.id, "other").await;

        let (rows, total) = store
            .todos()
            .list_by_owner(u1.id, PaginationQuery::new(1, 2))
            .await
            .unwrap();
        assert_eq!(total, 3);
        let titles: Vec<&str> = rows.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["third", "second"]);

        let (rows, total) = store
            .todos()
            .list_by_owner(u1.id, PaginationQuery::new(2, 2))
            .await
            .unwrap();
        assert_eq!(total, 3);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "first");

        let (all, total) = store.todos().list(PaginationQuery::default()).await.unwrap();
        assert_eq!(total, 4);
        assert_eq!(all[0].title, "other");
    }

    #[actix_rt::test]
    async fn test_deleting_user_removes_their_todos() {
        let store = MemoryStore::new();
        let owner = user(&store, "a@x.com").await;
        let created = todo(&store, owner.id, "T1").await;

        store.users().delete(owner.id).await.unwrap();

        assert!(matches!(
            store.todos().get_by_id(created.id).await,
            Err(AppError::TodoNotFound)
        ));
        assert!(store.users().get_by_email("a@x.com").await.unwrap().is_none());
    }
}

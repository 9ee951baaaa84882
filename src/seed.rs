//! Demo accounts and todos for local development.

use crate::error::AppError;
use crate::models::{CreateTodoRequest, CreateUserRequest};
use crate::services::{TodoService, UserService};

const DEMO_USERS: [(&str, &str, &str); 2] = [
    ("admin@example.com", "Admin User", "admin123"),
    ("user@example.com", "Regular User", "user123"),
];

// (owner index into DEMO_USERS, title, description)
const DEMO_TODOS: [(usize, &str, &str); 4] = [
    (0, "Learn Rust", "Work through ownership, borrowing and lifetimes"),
    (0, "Build REST API", "Create a REST API with actix-web and sqlx"),
    (1, "Setup Docker", "Configure Docker containers for development"),
    (1, "Learn React", "Study React hooks and Redux Toolkit"),
];

#[derive(Debug, Default, PartialEq)]
pub struct SeedReport {
    pub users_created: usize,
    pub todos_created: usize,
}

/// Inserts the demo data. Entries that fail (for example because the user already
/// exists) are logged and skipped.
pub async fn seed_demo_data(
    users: &UserService,
    todos: &TodoService,
) -> Result<SeedReport, AppError> {
    let mut report = SeedReport::default();
    let mut owners = Vec::with_capacity(DEMO_USERS.len());

    for (email, name, password) in DEMO_USERS {
        let created = users
            .create(CreateUserRequest {
                email: email.to_string(),
                name: name.to_string(),
                password: password.to_string(),
            })
            .await;

        match created {
            Ok(user) => {
                log::info!("Created user {}", user.email);
                report.users_created += 1;
                owners.push(Some(user.id));
            }
            Err(e) => {
                log::error!("Failed to create user {}: {}", email, e);
                owners.push(None);
            }
        }
    }

    for (owner_index, title, description) in DEMO_TODOS {
        let Some(owner) = owners[owner_index] else {
            continue;
        };

        let created = todos
            .create(
                owner,
                CreateTodoRequest {
                    title: title.to_string(),
                    description: Some(description.to_string()),
                },
            )
            .await;

        match created {
            Ok(todo) => {
                log::info!("Created todo {}", todo.title);
                report.todos_created += 1;
            }
            Err(e) => log::error!("Failed to create todo {}: {}", title, e),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PaginationQuery;
    use crate::repository::MemoryStore;
    use std::sync::Arc;

    #[actix_rt::test]
    async fn test_seed_is_skipped_when_users_exist() {
        let store = MemoryStore::new();
        let users = UserService::new(Arc::new(store.users()), 4);
        let todos = TodoService::new(Arc::new(store.todos()));

        let first = seed_demo_data(&users, &todos).await.unwrap();
        assert_eq!(
            first,
            SeedReport {
                users_created: 2,
                todos_created: 4,
            }
        );

        let second = seed_demo_data(&users, &todos).await.unwrap();
        assert_eq!(second, SeedReport::default());

        let all = todos.list_all(PaginationQuery::new(1, 100)).await.unwrap();
        assert_eq!(all.pagination.total, 4);
    }
}

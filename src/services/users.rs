use std::sync::Arc;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::error::AppError;
use crate::models::{CreateUserRequest, NewUser, User, UserPatch};
use crate::pagination::{Paginated, PaginationQuery};
use crate::repository::UserRepository;

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self { repo, bcrypt_cost }
    }

    /// Hashes the password and stores the new account.
    pub async fn create(&self, req: CreateUserRequest) -> Result<User, AppError> {
        let password_hash = hash_password(&req.password, self.bcrypt_cost)?;
        self.repo
            .create(NewUser {
                email: req.email,
                name: req.name,
                password_hash,
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<User, AppError> {
        self.repo.get_by_id(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.repo.get_by_email(email).await
    }

    pub async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, AppError> {
        self.repo.update(id, patch).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete(id).await
    }

    pub async fn list(&self, page: PaginationQuery) -> Result<Paginated<User>, AppError> {
        let (users, total) = self.repo.list(page).await?;
        Ok(Paginated::new(users, page, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::repository::MemoryStore;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryStore::new().users()), 4)
    }

    fn request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            name: "A".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[actix_rt::test]
    async fn test_create_hashes_password() {
        let users = service();
        let user = users.create(request("a@x.com")).await.unwrap();

        assert_ne!(user.password_hash, "secret1");
        assert!(verify_password("secret1", &user.password_hash).unwrap());
    }

    #[actix_rt::test]
    async fn test_list_paginates_users() {
        let users = service();
        for i in 0..3 {
            users.create(request(&format!("u{}@x.com", i))).await.unwrap();
        }

        let page = users.list(PaginationQuery::new(1, 2)).await.unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[actix_rt::test]
    async fn test_update_and_delete() {
        let users = service();
        let user = users.create(request("a@x.com")).await.unwrap();

        let updated = users
            .update(
                user.id,
                UserPatch {
                    name: Some("Renamed".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.email, "a@x.com");

        users.delete(user.id).await.unwrap();
        assert!(matches!(users.get(user.id).await, Err(AppError::UserNotFound)));
        assert!(matches!(users.delete(user.id).await, Err(AppError::UserNotFound)));
    }
}

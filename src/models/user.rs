use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::non_empty;

/// A registered account as stored in the `users` table.
///
/// The password hash is loaded from the database for credential checks but is never
/// serialized into API responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for registering a new account.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Insert input for the user store. The password has already been hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// Payload for updating the caller's profile. Omitted or empty fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(custom = "validate_patch_name")]
    pub name: Option<String>,
    #[validate(custom = "validate_patch_email")]
    pub email: Option<String>,
}

/// Normalized merge-patch for the user store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: non_empty(req.name),
            email: non_empty(req.email),
        }
    }
}

fn validate_patch_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() <= 100 {
        Ok(())
    } else {
        Err(ValidationError::new("length"))
    }
}

fn validate_patch_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || validator::validate_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation() {
        let input = CreateUserRequest {
            email: "a@x.com".to_string(),
            name: "A".to_string(),
            password: "secret1".to_string(),
        };
        assert!(input.validate().is_ok());

        let input = CreateUserRequest {
            email: "invalid-email".to_string(),
            name: "A user".to_string(),
            password: "secret1".to_string(),
        };
        assert!(input.validate().is_err());

        let input = CreateUserRequest {
            email: "a@x.com".to_string(),
            name: "".to_string(),
            password: "secret1".to_string(),
        };
        assert!(input.validate().is_err());

        let input = CreateUserRequest {
            email: "a@x.com".to_string(),
            name: "A user".to_string(),
            password: "short".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_user_validation_allows_empty_fields() {
        let input = UpdateUserRequest {
            name: Some(String::new()),
            email: Some(String::new()),
        };
        assert!(input.validate().is_ok());

        let input = UpdateUserRequest {
            name: Some("B".repeat(101)),
            email: None,
        };
        assert!(input.validate().is_err());

        let input = UpdateUserRequest {
            name: None,
            email: Some("not-an-email".to_string()),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_user_patch_drops_empty_strings() {
        let patch = UserPatch::from(UpdateUserRequest {
            name: Some(String::new()),
            email: Some("b@x.com".to_string()),
        });
        assert_eq!(patch.name, None);
        assert_eq!(patch.email.as_deref(), Some("b@x.com"));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            name: "A".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@x.com");
    }
}

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::Paginated;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, UserFilter, UserResponse};
use crate::repository::UserRepository;

/// Service layer for user business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user, hashing the password before it is stored.
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if self
            .repository
            .find_by_email(&input.email)
            .await?
            .is_some()
        {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let password_hash = self.hash_password(&input.password)?;

        let user = self
            .repository
            .create(input.email, password_hash, input.full_name, input.phone)
            .await?;

        Ok(user.into())
    }

    pub async fn get_user(&self, id: i32) -> UserResult<UserResponse> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    pub async fn list_users(&self, filter: UserFilter) -> UserResult<Paginated<UserResponse>> {
        filter
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        self.repository.list(filter).await
    }

    /// Partially update a user; a changed email is re-checked for duplicates
    /// and a changed password is re-hashed.
    pub async fn update_user(&self, id: i32, input: UpdateUser) -> UserResult<UserResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        if let Some(email) = &input.email {
            if *email != existing.email && self.repository.find_by_email(email).await?.is_some() {
                return Err(UserError::DuplicateEmail(email.clone()));
            }
        }

        let password_hash = match &input.password {
            Some(password) => Some(self.hash_password(password)?),
            None => None,
        };

        let user = self
            .repository
            .update(id, input.email, password_hash, input.full_name, input.phone)
            .await?;

        Ok(user.into())
    }

    pub async fn delete_user(&self, id: i32) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }
        Ok(())
    }

    /// Verify a plain-text password against a stored hash.
    pub fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::repository::MockUserRepository;

    fn sample_user(id: i32, email: &str, hash: &str) -> User {
        User {
            id,
            email: email.to_string(),
            password_hash: hash.to_string(),
            full_name: None,
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|_, hash, _, _| hash.starts_with("$argon2"))
            .returning(|email, hash, full_name, phone| {
                Ok(User {
                    id: 1,
                    email,
                    password_hash: hash,
                    full_name,
                    phone,
                })
            });

        let service = UserService::new(repo);
        let response = service
            .create_user(CreateUser {
                email: "ana@example.com".into(),
                password: "hunter2hunter2".into(),
                full_name: Some("Ana".into()),
                phone: None,
            })
            .await
            .unwrap();

        assert_eq!(response.email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(sample_user(1, email, "$argon2id$x"))));

        let service = UserService::new(repo);
        let result = service
            .create_user(CreateUser {
                email: "taken@example.com".into(),
                password: "hunter2hunter2".into(),
                full_name: None,
                phone: None,
            })
            .await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_create_user_rejects_invalid_email() {
        let repo = MockUserRepository::new();
        let service = UserService::new(repo);

        let result = service
            .create_user(CreateUser {
                email: "not-an-email".into(),
                password: "hunter2hunter2".into(),
                full_name: None,
                phone: None,
            })
            .await;

        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_password_round_trip() {
        let repo = MockUserRepository::new();
        let service = UserService::new(repo);

        let hash = service.hash_password("correct horse battery").unwrap();
        assert!(service.verify_password("correct horse battery", &hash).unwrap());
        assert!(!service.verify_password("wrong password", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserService::new(repo);
        let result = service.update_user(9, UpdateUser::default()).await;

        assert!(matches!(result, Err(UserError::NotFound(9))));
    }
}

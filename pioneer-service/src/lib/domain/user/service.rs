use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service backed by `repository`.
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, credentials: Credentials) -> Result<User, UserError> {
        // Check-then-insert: two concurrent registrations can both pass this
        // lookup, the storage unique constraint settles the race.
        if self
            .repository
            .find_by_username(&credentials.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                credentials.username.to_string(),
            ));
        }

        let password_hash = self
            .password_hasher
            .hash(&credentials.password)
            .map_err(|e| UserError::PasswordHashing(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            username: credentials.username,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFoundByUsername(username.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
        }
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials::new(
            Username::new(username.to_string()).unwrap(),
            password.to_string(),
        )
    }

    fn stored_user(username: &str) -> User {
        User {
            id: UserId::new(),
            username: Username::new(username.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .withf(|u| u.as_str() == "alice")
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "alice" && user.password_hash.starts_with("$argon2id")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let user = service
            .register_user(credentials("alice", "pw1"))
            .await
            .expect("registration failed");

        assert_eq!(user.username.as_str(), "alice");
        // Password is hashed with real Argon2
        assert!(auth::PasswordHasher::new()
            .verify("pw1", &user.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn test_register_user_existing_username() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|u| Ok(Some(stored_user(u.as_str()))));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service.register_user(credentials("alice", "pw2")).await;
        assert!(matches!(
            result,
            Err(UserError::UsernameAlreadyExists(ref name)) if name == "alice"
        ));
    }

    #[tokio::test]
    async fn test_register_user_lookup_failure() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection refused".to_string())));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service.register_user(credentials("alice", "pw1")).await;
        assert!(matches!(result, Err(UserError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_register_user_insert_failure() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let service = UserService::new(Arc::new(repository));

        let result = service.register_user(credentials("alice", "pw1")).await;
        assert!(matches!(result, Err(UserError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_get_user_by_username_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .withf(|u| u.as_str() == "alice")
            .times(1)
            .returning(|u| Ok(Some(stored_user(u.as_str()))));

        let service = UserService::new(Arc::new(repository));

        let username = Username::new("alice".to_string()).unwrap();
        let user = service.get_user_by_username(&username).await.unwrap();
        assert_eq!(user.username, username);
    }

    #[tokio::test]
    async fn test_get_user_by_username_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let username = Username::new("nobody".to_string()).unwrap();
        let result = service.get_user_by_username(&username).await;
        assert!(matches!(result, Err(UserError::NotFoundByUsername(_))));
    }
}

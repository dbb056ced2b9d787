//! Credential Store collaborator contract.
//!
//! The token core consumes user records only through this trait, so the
//! relational backend stays swappable (and tests run against an in-memory
//! implementation).

use async_trait::async_trait;

use librauth_core::result::AppResult;
use librauth_database::repositories::UserRepository;
use librauth_entity::User;

/// Data required to create a new user record.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address, already lowercased.
    pub email: String,
    /// Login name.
    pub username: String,
    /// Argon2id hash of the password.
    pub password_hash: String,
}

/// Lookup-and-create access to user records.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find a user by email or username (case-insensitive).
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>>;

    /// Insert a new user. Duplicate email/username is a `Conflict`.
    async fn create(&self, user: NewUser) -> AppResult<User>;
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        UserRepository::find_by_id(self, id).await
    }

    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_identifier(self, identifier).await
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        UserRepository::create(self, &user.email, &user.username, &user.password_hash).await
    }
}

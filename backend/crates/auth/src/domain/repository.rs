//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::{session::SessionRecord, user::User};
use crate::domain::value_object::{
    email::Email, password_digest::PasswordDigest, user_id::UserId,
};
use crate::error::AuthResult;

/// Lookup key for a single user
#[derive(Debug, Clone, Copy)]
pub enum UserFilter<'a> {
    Id(&'a UserId),
    Email(&'a Email),
    SessionToken(&'a str),
    ResetToken(&'a str),
}

/// Partial update of a user row
///
/// `None` leaves a column untouched. For the token columns `Some(None)`
/// clears the value.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub password_digest: Option<PasswordDigest>,
    pub session_token: Option<Option<String>>,
    pub reset_token: Option<Option<String>>,
}

impl UserUpdate {
    pub fn session_token(token: Option<String>) -> Self {
        Self {
            session_token: Some(token),
            ..Self::default()
        }
    }

    pub fn reset_token(token: Option<String>) -> Self {
        Self {
            reset_token: Some(token),
            ..Self::default()
        }
    }
}

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find the first user matching `filter`
    async fn find_user(&self, filter: &UserFilter<'_>) -> AuthResult<Option<User>>;

    /// Create a user; `AuthError::EmailTaken` if the email is registered
    async fn create_user(&self, email: &Email, digest: &PasswordDigest) -> AuthResult<User>;

    /// Apply `update`; `AuthError::UserNotFound` if no such user
    async fn update_user(&self, user_id: &UserId, update: &UserUpdate) -> AuthResult<()>;
}

/// Session records collaborator of the session registry
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    async fn insert(&self, record: &SessionRecord) -> AuthResult<()>;

    async fn find(&self, token: &str) -> AuthResult<Option<SessionRecord>>;

    /// `true` if a record was removed
    async fn delete(&self, token: &str) -> AuthResult<bool>;
}

/// Store that backs both users and durable sessions
pub trait AuthStore: UserRepository + SessionRepository + Send + Sync + 'static {}

impl<T> AuthStore for T where T: UserRepository + SessionRepository + Send + Sync + 'static {}

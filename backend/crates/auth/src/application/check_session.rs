//! Check Session Use Case
//!
//! Resolves a user service session token to its user.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::{UserFilter, UserRepository};
use crate::error::AuthResult;

/// Check session use case
pub struct CheckSessionUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> CheckSessionUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// A missing token resolves to no user
    pub async fn execute(&self, session_token: Option<&str>) -> AuthResult<Option<User>> {
        match session_token {
            Some(token) if !token.is_empty() => {
                self.repo.find_user(&UserFilter::SessionToken(token)).await
            }
            _ => Ok(None),
        }
    }
}

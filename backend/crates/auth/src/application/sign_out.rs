//! Sign Out Use Case
//!
//! Clears the user service session token.

use std::sync::Arc;

use crate::domain::repository::{UserFilter, UserRepository, UserUpdate};
use crate::error::{AuthError, AuthResult};

/// Sign out use case
pub struct SignOutUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> SignOutUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// `SessionInvalid` if no user holds `session_token`
    pub async fn execute(&self, session_token: &str) -> AuthResult<()> {
        let user = self
            .repo
            .find_user(&UserFilter::SessionToken(session_token))
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        self.repo
            .update_user(&user.id, &UserUpdate::session_token(None))
            .await?;

        tracing::info!(user_id = %user.id, "User signed out");
        Ok(())
    }
}

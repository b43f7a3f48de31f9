//! Password Reset Use Case
//!
//! Two steps: issue a one-time reset token for a registered email, then
//! trade that token for a new password.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{UserFilter, UserRepository, UserUpdate};
use crate::domain::value_object::{email::Email, password_digest::PasswordDigest};
use crate::error::{AuthError, AuthResult};

pub struct PasswordResetUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> PasswordResetUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Store and return a new reset token; `UserNotFound` if not registered
    pub async fn request_token(&self, email: &str) -> AuthResult<String> {
        let email = Email::new(email).map_err(|_| AuthError::UserNotFound)?;
        let user = self
            .repo
            .find_user(&UserFilter::Email(&email))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let reset_token = Uuid::new_v4().to_string();
        self.repo
            .update_user(&user.id, &UserUpdate::reset_token(Some(reset_token.clone())))
            .await?;

        tracing::info!(user_id = %user.id, "Password reset requested");
        Ok(reset_token)
    }

    /// Replace the password of the user holding `reset_token`
    ///
    /// The token is cleared so it cannot be used twice.
    pub async fn reset(&self, reset_token: &str, new_password: String) -> AuthResult<User> {
        if reset_token.is_empty() {
            return Err(AuthError::InvalidResetToken);
        }

        let user = self
            .repo
            .find_user(&UserFilter::ResetToken(reset_token))
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        let password = ClearTextPassword::new(new_password);
        self.config.password_policy.check(&password)?;
        let digest = PasswordDigest::from_clear(&password, self.config.pepper())?;

        self.repo
            .update_user(
                &user.id,
                &UserUpdate {
                    password_digest: Some(digest),
                    reset_token: Some(None),
                    ..UserUpdate::default()
                },
            )
            .await?;

        tracing::info!(user_id = %user.id, "Password updated");
        Ok(user)
    }
}

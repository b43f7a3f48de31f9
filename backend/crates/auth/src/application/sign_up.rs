//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, password_digest::PasswordDigest};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignUpUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        let email = Email::new(&input.email)
            .map_err(|e| AuthError::InvalidEmail(e.message().to_string()))?;

        // Policy first so a rejected password is never hashed
        let password = ClearTextPassword::new(input.password);
        self.config.password_policy.check(&password)?;
        let digest = PasswordDigest::from_clear(&password, self.config.pepper())?;

        let user = self.repo.create_user(&email, &digest).await?;

        tracing::info!(
            user_id = %user.id,
            email = %user.email,
            "User signed up"
        );

        Ok(user)
    }
}

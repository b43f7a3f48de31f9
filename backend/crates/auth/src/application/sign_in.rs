//! Sign In Use Case
//!
//! Verifies credentials and, for the user service, stores a fresh session
//! token on the user row.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{UserFilter, UserRepository, UserUpdate};
use crate::domain::value_object::{email::Email, session_token::SessionToken};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub user: User,
    /// Token for the `session_id` cookie
    pub session_token: SessionToken,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// The user owning `email` if `password` matches
    ///
    /// `UserNotFound` for an unknown or malformed email,
    /// `InvalidCredentials` for a wrong password.
    pub async fn authenticate(&self, email: &str, password: &str) -> AuthResult<User> {
        let email = Email::new(email).map_err(|_| AuthError::UserNotFound)?;

        let user = self
            .repo
            .find_user(&UserFilter::Email(&email))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let password = ClearTextPassword::new(password.to_string());
        if !user.password_digest.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let mut user = self.authenticate(&input.email, &input.password).await?;

        let session_token = SessionToken::generate();
        self.repo
            .update_user(
                &user.id,
                &UserUpdate::session_token(Some(session_token.as_str().to_string())),
            )
            .await?;
        user.session_token = Some(session_token.as_str().to_string());

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(SignInOutput {
            user,
            session_token,
        })
    }
}

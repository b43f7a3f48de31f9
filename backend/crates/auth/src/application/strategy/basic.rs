//! HTTP Basic authentication
//!
//! Credentials come from `Authorization: Basic <base64(email:password)>` on
//! every request. Each stage of the pipeline returns `None` on malformed
//! input so a bad header simply resolves to no identity.

use std::sync::Arc;

use axum::http::HeaderMap;
use platform::crypto::from_base64;
use platform::password::ClearTextPassword;

use super::{AuthStrategy, authorization_header};
use crate::domain::entity::user::User;
use crate::domain::repository::{UserFilter, UserRepository};
use crate::domain::value_object::{email::Email, session_token::SessionToken, user_id::UserId};
use crate::error::AuthResult;

const BASIC_PREFIX: &str = "Basic ";

/// Base64 part of a `Basic` authorization header; `None` if blank
pub fn extract_base64_authorization_header(header: &str) -> Option<&str> {
    let encoded = header.strip_prefix(BASIC_PREFIX)?.trim();
    (!encoded.is_empty()).then_some(encoded)
}

/// Decode standard base64 into UTF-8 text
pub fn decode_base64_authorization_header(encoded: &str) -> Option<String> {
    let bytes = from_base64(encoded).ok()?;
    String::from_utf8(bytes).ok()
}

/// Split `identity:password` at the first colon
pub fn extract_user_credentials(decoded: &str) -> Option<(&str, &str)> {
    decoded.split_once(':')
}

pub struct BasicAuth<R>
where
    R: UserRepository,
{
    users: Arc<R>,
    pepper: Option<Vec<u8>>,
}

impl<R> BasicAuth<R>
where
    R: UserRepository + Send + Sync,
{
    pub fn new(users: Arc<R>, pepper: Option<Vec<u8>>) -> Self {
        Self { users, pepper }
    }

    /// The user registered under `email` whose password is `password`
    pub async fn user_object_from_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> AuthResult<Option<User>> {
        let Ok(email) = Email::new(email) else {
            return Ok(None);
        };

        let Some(user) = self.users.find_user(&UserFilter::Email(&email)).await? else {
            return Ok(None);
        };

        let password = ClearTextPassword::new(password.to_string());
        if !user.password_digest.verify(&password, self.pepper.as_deref()) {
            tracing::debug!(user_id = %user.id, "Basic auth password mismatch");
            return Ok(None);
        }

        Ok(Some(user))
    }
}

impl<R> AuthStrategy for BasicAuth<R>
where
    R: UserRepository + Send + Sync,
{
    async fn resolve_identity(&self, headers: &HeaderMap) -> AuthResult<Option<User>> {
        let Some(decoded) = authorization_header(headers)
            .and_then(extract_base64_authorization_header)
            .and_then(decode_base64_authorization_header)
        else {
            return Ok(None);
        };

        let Some((email, password)) = extract_user_credentials(&decoded) else {
            return Ok(None);
        };

        self.user_object_from_credentials(email, password).await
    }

    async fn create_session(&self, _user_id: &UserId) -> AuthResult<Option<SessionToken>> {
        Ok(None)
    }

    async fn destroy_session(&self, _headers: &HeaderMap) -> AuthResult<bool> {
        Ok(false)
    }
}

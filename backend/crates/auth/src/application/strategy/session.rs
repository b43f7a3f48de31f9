//! Cookie session authentication
//!
//! The session cookie names a token in the session registry; the registry
//! maps it back to a user. Whether sessions expire and where the records
//! live is decided by the registry, not by this strategy.

use std::sync::Arc;

use axum::http::HeaderMap;

use super::{AuthStrategy, session_cookie};
use crate::application::session_registry::SessionRegistry;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserFilter, UserRepository};
use crate::domain::value_object::{session_token::SessionToken, user_id::UserId};
use crate::error::AuthResult;

pub struct SessionAuth<S, R>
where
    S: SessionRepository,
    R: UserRepository,
{
    registry: SessionRegistry<S>,
    users: Arc<R>,
    cookie_name: String,
}

impl<S, R> SessionAuth<S, R>
where
    S: SessionRepository + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(registry: SessionRegistry<S>, users: Arc<R>, cookie_name: impl Into<String>) -> Self {
        Self {
            registry,
            users,
            cookie_name: cookie_name.into(),
        }
    }
}

impl<S, R> AuthStrategy for SessionAuth<S, R>
where
    S: SessionRepository + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn resolve_identity(&self, headers: &HeaderMap) -> AuthResult<Option<User>> {
        let Some(token) = session_cookie(headers, &self.cookie_name) else {
            return Ok(None);
        };

        let Some(user_id) = self.registry.resolve(&token).await? else {
            return Ok(None);
        };

        self.users.find_user(&UserFilter::Id(&user_id)).await
    }

    async fn create_session(&self, user_id: &UserId) -> AuthResult<Option<SessionToken>> {
        self.registry.create(user_id).await.map(Some)
    }

    async fn destroy_session(&self, headers: &HeaderMap) -> AuthResult<bool> {
        match session_cookie(headers, &self.cookie_name) {
            Some(token) => self.registry.destroy(&token).await,
            None => Ok(false),
        }
    }
}

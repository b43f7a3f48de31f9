//! Strategy selection and dispatch

use std::sync::Arc;

use axum::http::HeaderMap;

use super::{AuthStrategy, BasicAuth, SessionAuth};
use crate::application::config::{AuthConfig, AuthType};
use crate::application::session_registry::SessionRegistry;
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::entity::user::User;
use crate::domain::repository::AuthStore;
use crate::domain::value_object::{
    excluded_path::ExcludedPaths, session_token::SessionToken, user_id::UserId,
};
use crate::error::AuthResult;
use crate::infra::memory::MemorySessionRepository;

/// Gate that never resolves an identity
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl AuthStrategy for NoAuth {
    async fn resolve_identity(&self, _headers: &HeaderMap) -> AuthResult<Option<User>> {
        Ok(None)
    }

    async fn create_session(&self, _user_id: &UserId) -> AuthResult<Option<SessionToken>> {
        Ok(None)
    }

    async fn destroy_session(&self, _headers: &HeaderMap) -> AuthResult<bool> {
        Ok(false)
    }
}

/// The strategy chosen by `AUTH_TYPE`
///
/// `session_auth` and `session_exp_auth` share the in-process registry and
/// differ only in expiration. `session_db_auth` keeps its records in the
/// store itself so they survive a restart.
pub enum Authenticator<R>
where
    R: AuthStore,
{
    None(NoAuth),
    Basic(BasicAuth<R>),
    Session(SessionAuth<MemorySessionRepository, R>),
    SessionDb(SessionAuth<R, R>),
}

impl<R> Authenticator<R>
where
    R: AuthStore,
{
    pub fn from_config(config: &AuthConfig, store: Arc<R>) -> Self {
        Self::with_clock(config, store, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &AuthConfig, store: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        let expiration = config.session_expiration();

        let authenticator = match config.auth_type {
            AuthType::None => Authenticator::None(NoAuth),
            AuthType::Basic => {
                Authenticator::Basic(BasicAuth::new(store, config.password_pepper.clone()))
            }
            AuthType::Session | AuthType::SessionExp => {
                let registry = SessionRegistry::with_clock(
                    Arc::new(MemorySessionRepository::new()),
                    expiration,
                    clock,
                );
                Authenticator::Session(SessionAuth::new(registry, store, &config.session_name))
            }
            AuthType::SessionDb => {
                let registry = SessionRegistry::with_clock(store.clone(), expiration, clock);
                Authenticator::SessionDb(SessionAuth::new(registry, store, &config.session_name))
            }
        };

        tracing::info!(
            auth_type = config.auth_type.as_str(),
            session_ttl_secs = expiration.as_secs().unwrap_or(0),
            "Authentication strategy selected"
        );

        authenticator
    }

    /// Whether `create_session` can ever return a token
    pub fn supports_sessions(&self) -> bool {
        matches!(self, Authenticator::Session(_) | Authenticator::SessionDb(_))
    }
}

impl<R> AuthStrategy for Authenticator<R>
where
    R: AuthStore,
{
    fn requires_auth(&self, path: Option<&str>, excluded: &ExcludedPaths) -> bool {
        match self {
            Authenticator::None(s) => s.requires_auth(path, excluded),
            Authenticator::Basic(s) => s.requires_auth(path, excluded),
            Authenticator::Session(s) => s.requires_auth(path, excluded),
            Authenticator::SessionDb(s) => s.requires_auth(path, excluded),
        }
    }

    async fn resolve_identity(&self, headers: &HeaderMap) -> AuthResult<Option<User>> {
        match self {
            Authenticator::None(s) => s.resolve_identity(headers).await,
            Authenticator::Basic(s) => s.resolve_identity(headers).await,
            Authenticator::Session(s) => s.resolve_identity(headers).await,
            Authenticator::SessionDb(s) => s.resolve_identity(headers).await,
        }
    }

    async fn create_session(&self, user_id: &UserId) -> AuthResult<Option<SessionToken>> {
        match self {
            Authenticator::None(s) => s.create_session(user_id).await,
            Authenticator::Basic(s) => s.create_session(user_id).await,
            Authenticator::Session(s) => s.create_session(user_id).await,
            Authenticator::SessionDb(s) => s.create_session(user_id).await,
        }
    }

    async fn destroy_session(&self, headers: &HeaderMap) -> AuthResult<bool> {
        match self {
            Authenticator::None(s) => s.destroy_session(headers).await,
            Authenticator::Basic(s) => s.destroy_session(headers).await,
            Authenticator::Session(s) => s.destroy_session(headers).await,
            Authenticator::SessionDb(s) => s.destroy_session(headers).await,
        }
    }
}

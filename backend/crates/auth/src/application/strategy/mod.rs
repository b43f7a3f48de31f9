//! Authentication Strategies
//!
//! A strategy answers three questions for the request gate: does this path
//! need authentication, who is making this request, and can a session be
//! opened or closed. [`Authenticator`] selects one strategy from
//! configuration and dispatches to it.

pub mod authenticator;
pub mod basic;
pub mod session;

use axum::http::{HeaderMap, header};

use crate::domain::entity::user::User;
use crate::domain::value_object::{
    excluded_path::ExcludedPaths, session_token::SessionToken, user_id::UserId,
};
use crate::error::AuthResult;

pub use authenticator::{Authenticator, NoAuth};
pub use basic::BasicAuth;
pub use session::SessionAuth;

/// Capability set shared by every strategy
///
/// Malformed or unknown credentials resolve to `Ok(None)`; only store
/// failures surface as errors.
#[trait_variant::make(AuthStrategy: Send)]
pub trait LocalAuthStrategy {
    /// Whether `path` is subject to the gate
    fn requires_auth(&self, path: Option<&str>, excluded: &ExcludedPaths) -> bool {
        excluded.requires_auth(path)
    }

    /// The user the request authenticates as, if any
    async fn resolve_identity(&self, headers: &HeaderMap) -> AuthResult<Option<User>>;

    /// Open a session for `user_id`; `None` if the strategy has no sessions
    async fn create_session(&self, user_id: &UserId) -> AuthResult<Option<SessionToken>>;

    /// Close the session named by the request cookie; `true` if one was closed
    async fn destroy_session(&self, headers: &HeaderMap) -> AuthResult<bool>;
}

/// Raw `Authorization` header value
pub fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::AUTHORIZATION)?.to_str().ok()
}

/// Value of the session cookie called `name`
pub fn session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    platform::cookie::extract_cookie(headers, name)
}

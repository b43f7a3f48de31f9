//! Request Gate
//!
//! Runs before every gated handler:
//!
//! 1. excluded path: pass through
//! 2. no `Authorization` header and no session cookie: 401
//! 3. credentials that resolve to no user: 403
//! 4. otherwise the user is attached as [`CurrentUser`]

use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::strategy::{AuthStrategy, session_cookie};
use crate::domain::entity::user::User;
use crate::domain::repository::AuthStore;
use crate::domain::value_object::excluded_path::ExcludedPaths;
use crate::error::AuthResult;
use crate::presentation::dto::ErrorResponse;
use crate::presentation::state::AppState;

/// Authenticated user, stored in request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Result of running the gate over one request
#[derive(Debug)]
pub enum GateOutcome {
    Exempt,
    ChallengeMissing,
    IdentityMissing,
    Authenticated(User),
}

/// Decide what happens to a request for `path`
pub async fn evaluate<S>(
    strategy: &S,
    excluded: &ExcludedPaths,
    session_name: &str,
    path: &str,
    headers: &HeaderMap,
) -> AuthResult<GateOutcome>
where
    S: AuthStrategy + Sync,
{
    if !strategy.requires_auth(Some(path), excluded) {
        return Ok(GateOutcome::Exempt);
    }

    let has_credentials = headers.contains_key(header::AUTHORIZATION)
        || session_cookie(headers, session_name).is_some();
    if !has_credentials {
        return Ok(GateOutcome::ChallengeMissing);
    }

    Ok(match strategy.resolve_identity(headers).await? {
        Some(user) => GateOutcome::Authenticated(user),
        None => GateOutcome::IdentityMissing,
    })
}

/// Middleware enforcing the active strategy on gated routes
pub async fn authenticate<R>(
    State(state): State<AppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: AuthStore,
{
    let path = req.uri().path().to_owned();
    let headers = req.headers().clone();

    let outcome = evaluate(
        state.authenticator.as_ref(),
        &state.config.excluded_paths,
        &state.config.session_name,
        &path,
        &headers,
    )
    .await;

    match outcome {
        Ok(GateOutcome::Exempt) => next.run(req).await,
        Ok(GateOutcome::Authenticated(user)) => {
            tracing::debug!(user_id = %user.id, path = %path, "Request authenticated");
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        Ok(GateOutcome::ChallengeMissing) => {
            tracing::debug!(path = %path, "Request without credentials");
            (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new("Unauthorized"))).into_response()
        }
        Ok(GateOutcome::IdentityMissing) => {
            tracing::debug!(path = %path, "Credentials did not resolve to a user");
            (StatusCode::FORBIDDEN, Json(ErrorResponse::new("Forbidden"))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

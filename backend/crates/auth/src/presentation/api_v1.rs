//! Gated API Handlers (`/api/v1`)

use axum::extract::rejection::FormRejection;
use axum::extract::{Extension, Form, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::application::SignInUseCase;
use crate::application::strategy::AuthStrategy;
use crate::domain::repository::AuthStore;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{CredentialsForm, ErrorResponse, StatusResponse, UserResponse};
use crate::presentation::middleware::CurrentUser;
use crate::presentation::state::AppState;

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

/// GET /api/v1/status
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "OK".to_string(),
    })
}

/// GET /api/v1/unauthorized
pub async fn unauthorized() -> Response {
    error(StatusCode::UNAUTHORIZED, "Unauthorized")
}

/// GET /api/v1/forbidden
pub async fn forbidden() -> Response {
    error(StatusCode::FORBIDDEN, "Forbidden")
}

/// GET /api/v1/users/me
pub async fn current_user(user: Option<Extension<CurrentUser>>) -> Response {
    match user {
        Some(Extension(CurrentUser(user))) => Json(UserResponse::from(&user)).into_response(),
        None => error(StatusCode::NOT_FOUND, "Not found"),
    }
}

/// POST /api/v1/auth_session/login
pub async fn session_login<R>(
    State(state): State<AppState<R>>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> AuthResult<Response>
where
    R: AuthStore,
{
    let form = form.map(|Form(f)| f).unwrap_or_default();

    let Some(email) = form.email.filter(|e| !e.is_empty()) else {
        return Ok(error(StatusCode::BAD_REQUEST, "email missing"));
    };
    let Some(password) = form.password.filter(|p| !p.is_empty()) else {
        return Ok(error(StatusCode::BAD_REQUEST, "password missing"));
    };

    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());
    let user = match use_case.authenticate(&email, &password).await {
        Ok(user) => user,
        Err(AuthError::UserNotFound) => {
            return Ok(error(StatusCode::NOT_FOUND, "no user found for this email"));
        }
        Err(AuthError::InvalidCredentials) => {
            return Ok(error(StatusCode::UNAUTHORIZED, "wrong password"));
        }
        Err(e) => return Err(e),
    };

    let token = state
        .authenticator
        .create_session(&user.id)
        .await?
        .ok_or(AuthError::SessionUnsupported)?;

    let cookie = state
        .config
        .session_cookie()
        .set_cookie_header(token.as_str())
        .map_err(|e| AuthError::Internal(format!("Invalid session cookie: {e}")))?;

    tracing::info!(user_id = %user.id, "API session opened");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(&user)),
    )
        .into_response())
}

/// DELETE /api/v1/auth_session/logout
pub async fn session_logout<R>(
    State(state): State<AppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    R: AuthStore,
{
    if !state.authenticator.destroy_session(&headers).await? {
        return Ok(error(StatusCode::NOT_FOUND, "Not found"));
    }

    let cookie = state
        .config
        .session_cookie()
        .delete_cookie_header()
        .map_err(|e| AuthError::Internal(format!("Invalid session cookie: {e}")))?;

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(json!({}))).into_response())
}

//! User Service Handlers
//!
//! Registration, login with a `session_id` cookie, profile and password
//! reset. These routes sit outside the request gate.

use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};

use platform::cookie::extract_cookie;

use crate::application::config::USER_SERVICE_COOKIE;
use crate::application::{
    CheckSessionUseCase, PasswordResetUseCase, SignInInput, SignInUseCase, SignOutUseCase,
    SignUpInput, SignUpUseCase,
};
use crate::domain::repository::AuthStore;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CredentialsForm, EmailMessageResponse, MessageResponse, ProfileResponse, ResetTokenForm,
    ResetTokenResponse, UpdatePasswordForm,
};
use crate::presentation::state::AppState;

// ============================================================================
// Index
// ============================================================================

/// GET /
pub async fn index() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Bienvenue".to_string(),
    })
}

// ============================================================================
// Registration
// ============================================================================

/// POST /users
///
/// Every rejection other than a store failure is reported as an already
/// registered email.
pub async fn register_user<R>(
    State(state): State<AppState<R>>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Response
where
    R: AuthStore,
{
    let form = form.map(|Form(f)| f).unwrap_or_default();

    let result = match (form.email, form.password) {
        (Some(email), Some(password)) => {
            let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());
            use_case.execute(SignUpInput { email, password }).await
        }
        _ => Err(AuthError::InvalidEmail("missing form field".to_string())),
    };

    match result {
        Ok(user) => Json(EmailMessageResponse {
            email: user.email.to_string(),
            message: "user created".to_string(),
        })
        .into_response(),
        Err(e) if e.is_server_error() => e.into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "Registration rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse {
                    message: "email already registered".to_string(),
                }),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Sessions
// ============================================================================

/// POST /sessions
pub async fn login<R>(
    State(state): State<AppState<R>>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> AuthResult<Response>
where
    R: AuthStore,
{
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let (Some(email), Some(password)) = (form.email, form.password) else {
        return Err(AuthError::InvalidCredentials);
    };

    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(SignInInput { email, password })
        .await
        .map_err(|e| {
            if e.is_server_error() {
                e
            } else {
                AuthError::InvalidCredentials
            }
        })?;

    let cookie = state
        .config
        .user_service_cookie()
        .set_cookie_header(output.session_token.as_str())
        .map_err(|e| AuthError::Internal(format!("Invalid session cookie: {e}")))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(EmailMessageResponse {
            email: output.user.email.to_string(),
            message: "logged in".to_string(),
        }),
    )
        .into_response())
}

/// DELETE /sessions
pub async fn logout<R>(State(state): State<AppState<R>>, headers: HeaderMap) -> AuthResult<Response>
where
    R: AuthStore,
{
    let Some(token) = extract_cookie(&headers, USER_SERVICE_COOKIE) else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    let use_case = SignOutUseCase::new(state.repo.clone());
    match use_case.execute(&token).await {
        Ok(()) => {}
        Err(AuthError::SessionInvalid) => return Ok(StatusCode::NOT_FOUND.into_response()),
        Err(e) => return Err(e),
    }

    let cookie = state
        .config
        .user_service_cookie()
        .delete_cookie_header()
        .map_err(|e| AuthError::Internal(format!("Invalid session cookie: {e}")))?;

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)]).into_response())
}

// ============================================================================
// Profile
// ============================================================================

/// GET /profile
pub async fn profile<R>(State(state): State<AppState<R>>, headers: HeaderMap) -> AuthResult<Response>
where
    R: AuthStore,
{
    let token = extract_cookie(&headers, USER_SERVICE_COOKIE);

    let use_case = CheckSessionUseCase::new(state.repo.clone());
    match use_case.execute(token.as_deref()).await? {
        Some(user) => Ok(Json(ProfileResponse {
            email: user.email.to_string(),
        })
        .into_response()),
        None => Ok(StatusCode::FORBIDDEN.into_response()),
    }
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /reset_password
pub async fn get_reset_password_token<R>(
    State(state): State<AppState<R>>,
    form: Result<Form<ResetTokenForm>, FormRejection>,
) -> AuthResult<Response>
where
    R: AuthStore,
{
    let Some(email) = form.ok().and_then(|Form(f)| f.email) else {
        return Ok(StatusCode::FORBIDDEN.into_response());
    };

    let use_case = PasswordResetUseCase::new(state.repo.clone(), state.config.clone());
    match use_case.request_token(&email).await {
        Ok(reset_token) => Ok(Json(ResetTokenResponse { email, reset_token }).into_response()),
        Err(e) if e.is_server_error() => Err(e),
        Err(_) => Ok(StatusCode::FORBIDDEN.into_response()),
    }
}

/// PUT /reset_password
///
/// The user is found by reset token alone; the response carries that
/// user's email.
pub async fn update_password<R>(
    State(state): State<AppState<R>>,
    form: Result<Form<UpdatePasswordForm>, FormRejection>,
) -> AuthResult<Response>
where
    R: AuthStore,
{
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let (Some(reset_token), Some(new_password)) = (form.reset_token, form.new_password) else {
        return Ok(StatusCode::FORBIDDEN.into_response());
    };

    let use_case = PasswordResetUseCase::new(state.repo.clone(), state.config.clone());
    match use_case.reset(&reset_token, new_password).await {
        Ok(user) => Ok(Json(EmailMessageResponse {
            email: user.email.to_string(),
            message: "Password updated".to_string(),
        })
        .into_response()),
        Err(e @ AuthError::PasswordPolicy(_)) => Err(e),
        Err(e) if e.is_server_error() => Err(e),
        Err(_) => Ok(StatusCode::FORBIDDEN.into_response()),
    }
}

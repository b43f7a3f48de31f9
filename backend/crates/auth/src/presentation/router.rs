//! Auth Routers

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::domain::repository::AuthStore;
use crate::presentation::state::AppState;
use crate::presentation::{api_v1, handlers, middleware::authenticate};

/// User service routes (not gated)
pub fn user_service_router<R>(state: AppState<R>) -> Router
where
    R: AuthStore,
{
    Router::new()
        .route("/", get(handlers::index))
        .route("/users", post(handlers::register_user::<R>))
        .route(
            "/sessions",
            post(handlers::login::<R>).delete(handlers::logout::<R>),
        )
        .route("/profile", get(handlers::profile::<R>))
        .route(
            "/reset_password",
            post(handlers::get_reset_password_token::<R>).put(handlers::update_password::<R>),
        )
        .with_state(state)
}

/// `/api/v1` routes behind the request gate
pub fn api_v1_router<R>(state: AppState<R>) -> Router
where
    R: AuthStore,
{
    Router::new()
        .route("/api/v1/status", get(api_v1::status))
        .route("/api/v1/unauthorized", get(api_v1::unauthorized))
        .route("/api/v1/forbidden", get(api_v1::forbidden))
        .route("/api/v1/users/me", get(api_v1::current_user))
        .route("/api/v1/auth_session/login", post(api_v1::session_login::<R>))
        .route("/api/v1/auth_session/logout", delete(api_v1::session_logout::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate::<R>,
        ))
        .with_state(state)
}

/// Both routers merged
pub fn auth_router<R>(state: AppState<R>) -> Router
where
    R: AuthStore,
{
    user_service_router(state.clone()).merge(api_v1_router(state))
}

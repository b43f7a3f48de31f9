//! Crate-level tests: strategies, gate and HTTP flows over an in-memory
//! SQLite store

use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue, header};
use chrono::{DateTime, Duration};
use platform::crypto::to_base64;
use platform::password::ClearTextPassword;

use crate::application::config::{AuthConfig, AuthType};
use crate::application::strategy::{AuthStrategy, Authenticator};
use crate::domain::clock::ManualClock;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, password_digest::PasswordDigest};
use crate::infra::sqlite::{SqliteAuthRepository, tests::memory_repo};

async fn seed_user(repo: &SqliteAuthRepository, email: &str, password: &str) -> User {
    let digest =
        PasswordDigest::from_clear(&ClearTextPassword::new(password.to_string()), None).unwrap();
    repo.create_user(&Email::new(email).unwrap(), &digest)
        .await
        .unwrap()
}

fn config(auth_type: AuthType) -> AuthConfig {
    AuthConfig::from_lookup(|name| match name {
        "AUTH_TYPE" => Some(auth_type.as_str().to_string()),
        _ => None,
    })
    .unwrap()
}

fn basic_headers(credentials: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = format!("Basic {}", to_base64(credentials.as_bytes()));
    headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
    headers
}

fn cookie_headers(name: &str, token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_str(&format!("{name}={token}")).unwrap(),
    );
    headers
}

#[cfg(test)]
mod strategy_tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_auth_resolves_valid_credentials() {
        let repo = Arc::new(memory_repo().await);
        let bob = seed_user(&repo, "bob@hbtn.io", "H0lbertonSchool98!").await;
        let auth = Authenticator::from_config(&config(AuthType::Basic), repo.clone());

        let user = auth
            .resolve_identity(&basic_headers("bob@hbtn.io:H0lbertonSchool98!"))
            .await
            .unwrap();
        assert_eq!(user.map(|u| u.id), Some(bob.id));
    }

    #[tokio::test]
    async fn test_basic_auth_rejects_bad_credentials_without_error() {
        let repo = Arc::new(memory_repo().await);
        seed_user(&repo, "bob@hbtn.io", "pw").await;
        let auth = Authenticator::from_config(&config(AuthType::Basic), repo.clone());

        for credentials in ["bob@hbtn.io:wrong", "nobody@hbtn.io:pw", "not-an-email:pw", "nocolon"] {
            let user = auth.resolve_identity(&basic_headers(credentials)).await.unwrap();
            assert!(user.is_none(), "{credentials}");
        }

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert!(auth.resolve_identity(&headers).await.unwrap().is_none());
        assert!(auth.resolve_identity(&HeaderMap::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_basic_auth_password_may_contain_colons() {
        let repo = Arc::new(memory_repo().await);
        let bob = seed_user(&repo, "bob@hbtn.io", "b:c").await;
        let auth = Authenticator::from_config(&config(AuthType::Basic), repo.clone());

        let user = auth.resolve_identity(&basic_headers("bob@hbtn.io:b:c")).await.unwrap();
        assert_eq!(user.map(|u| u.id), Some(bob.id));
    }

    #[tokio::test]
    async fn test_non_session_strategies_have_no_sessions() {
        let repo = Arc::new(memory_repo().await);
        let bob = seed_user(&repo, "bob@hbtn.io", "pw").await;

        for auth_type in [AuthType::None, AuthType::Basic] {
            let auth = Authenticator::from_config(&config(auth_type), repo.clone());
            assert!(!auth.supports_sessions());
            assert!(auth.create_session(&bob.id).await.unwrap().is_none());
            assert!(!auth.destroy_session(&HeaderMap::new()).await.unwrap());
        }

        let none = Authenticator::from_config(&config(AuthType::None), repo.clone());
        let user = none.resolve_identity(&basic_headers("bob@hbtn.io:pw")).await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_session_auth_round_trip() {
        let repo = Arc::new(memory_repo().await);
        let bob = seed_user(&repo, "bob@hbtn.io", "pw").await;
        let auth = Authenticator::from_config(&config(AuthType::Session), repo.clone());

        let token = auth.create_session(&bob.id).await.unwrap().unwrap();
        let headers = cookie_headers("_my_session_id", token.as_str());

        let user = auth.resolve_identity(&headers).await.unwrap();
        assert_eq!(user.map(|u| u.id), Some(bob.id));

        assert!(auth.destroy_session(&headers).await.unwrap());
        assert!(auth.resolve_identity(&headers).await.unwrap().is_none());
        assert!(!auth.destroy_session(&headers).await.unwrap());
    }

    #[tokio::test]
    async fn test_session_auth_ignores_other_cookie_names() {
        let repo = Arc::new(memory_repo().await);
        let bob = seed_user(&repo, "bob@hbtn.io", "pw").await;
        let auth = Authenticator::from_config(&config(AuthType::Session), repo.clone());

        let token = auth.create_session(&bob.id).await.unwrap().unwrap();
        let headers = cookie_headers("session_id", token.as_str());
        assert!(auth.resolve_identity(&headers).await.unwrap().is_none());
        assert!(!auth.destroy_session(&headers).await.unwrap());
    }

    #[tokio::test]
    async fn test_session_exp_auth_expires() {
        let repo = Arc::new(memory_repo().await);
        let bob = seed_user(&repo, "bob@hbtn.io", "pw").await;
        let config = AuthConfig::from_lookup(|name| match name {
            "AUTH_TYPE" => Some("session_exp_auth".into()),
            "SESSION_DURATION" => Some("60".into()),
            _ => None,
        })
        .unwrap();
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
        ));
        let auth = Authenticator::with_clock(&config, repo.clone(), clock.clone());

        let token = auth.create_session(&bob.id).await.unwrap().unwrap();
        let headers = cookie_headers("_my_session_id", token.as_str());

        clock.advance(Duration::seconds(60));
        assert!(auth.resolve_identity(&headers).await.unwrap().is_some());

        clock.advance(Duration::seconds(1));
        assert!(auth.resolve_identity(&headers).await.unwrap().is_none());
        // already deleted on the previous lookup
        assert!(!auth.destroy_session(&headers).await.unwrap());
    }

    #[tokio::test]
    async fn test_session_db_auth_survives_rebuild() {
        let repo = Arc::new(memory_repo().await);
        let bob = seed_user(&repo, "bob@hbtn.io", "pw").await;
        let config = config(AuthType::SessionDb);

        let token = {
            let auth = Authenticator::from_config(&config, repo.clone());
            auth.create_session(&bob.id).await.unwrap().unwrap()
        };

        let rebuilt = Authenticator::from_config(&config, repo.clone());
        let headers = cookie_headers("_my_session_id", token.as_str());
        let user = rebuilt.resolve_identity(&headers).await.unwrap();
        assert_eq!(user.map(|u| u.id), Some(bob.id));

        assert!(rebuilt.destroy_session(&headers).await.unwrap());
        assert!(rebuilt.resolve_identity(&headers).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_process_sessions_do_not_survive_rebuild() {
        let repo = Arc::new(memory_repo().await);
        let bob = seed_user(&repo, "bob@hbtn.io", "pw").await;
        let config = config(AuthType::Session);

        let token = Authenticator::from_config(&config, repo.clone())
            .create_session(&bob.id)
            .await
            .unwrap()
            .unwrap();

        let rebuilt = Authenticator::from_config(&config, repo.clone());
        let headers = cookie_headers("_my_session_id", token.as_str());
        assert!(rebuilt.resolve_identity(&headers).await.unwrap().is_none());
    }
}

#[cfg(test)]
mod gate_tests {
    use super::*;
    use crate::presentation::middleware::{GateOutcome, evaluate};

    #[tokio::test]
    async fn test_gate_outcomes_with_basic_auth() {
        let repo = Arc::new(memory_repo().await);
        let bob = seed_user(&repo, "bob@hbtn.io", "pw").await;
        let config = config(AuthType::Basic);
        let auth = Authenticator::from_config(&config, repo.clone());
        let excluded = &config.excluded_paths;
        let name = &config.session_name;

        let outcome = evaluate(&auth, excluded, name, "/api/v1/status/", &HeaderMap::new())
            .await
            .unwrap();
        assert!(matches!(outcome, GateOutcome::Exempt));

        let outcome = evaluate(&auth, excluded, name, "/api/v1/users/me", &HeaderMap::new())
            .await
            .unwrap();
        assert!(matches!(outcome, GateOutcome::ChallengeMissing));

        let outcome = evaluate(
            &auth,
            excluded,
            name,
            "/api/v1/users/me",
            &basic_headers("bob@hbtn.io:wrong"),
        )
        .await
        .unwrap();
        assert!(matches!(outcome, GateOutcome::IdentityMissing));

        let outcome = evaluate(
            &auth,
            excluded,
            name,
            "/api/v1/users/me",
            &basic_headers("bob@hbtn.io:pw"),
        )
        .await
        .unwrap();
        assert!(matches!(outcome, GateOutcome::Authenticated(u) if u.id == bob.id));
    }

    #[tokio::test]
    async fn test_session_cookie_counts_as_credentials() {
        let repo = Arc::new(memory_repo().await);
        let config = config(AuthType::Basic);
        let auth = Authenticator::from_config(&config, repo.clone());

        let outcome = evaluate(
            &auth,
            &config.excluded_paths,
            &config.session_name,
            "/api/v1/users/me",
            &cookie_headers("_my_session_id", "whatever"),
        )
        .await
        .unwrap();
        assert!(matches!(outcome, GateOutcome::IdentityMissing));
    }
}

#[cfg(test)]
mod router_tests {
    use super::*;
    use crate::presentation::{AppState, auth_router};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn app(auth_type: AuthType) -> (Router, Arc<SqliteAuthRepository>) {
        let repo = memory_repo().await;
        let state = AppState::new(repo, config(auth_type));
        let repo = state.repo.clone();
        (auth_router(state), repo)
    }

    fn form(method: Method, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str, headers: HeaderMap) -> Request<Body> {
        let mut req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        *req.headers_mut() = headers;
        req
    }

    async fn json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// `name=value` part of the response's Set-Cookie header
    fn set_cookie(response: &Response) -> String {
        let value = response.headers()[header::SET_COOKIE].to_str().unwrap();
        value.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_index() {
        let (app, _) = app(AuthType::None).await;
        let response = app.oneshot(get("/", HeaderMap::new())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await, serde_json::json!({"message": "Bienvenue"}));
    }

    #[tokio::test]
    async fn test_user_service_flow() {
        let (app, _) = app(AuthType::None).await;
        let creds = "email=bob%40hbtn.io&password=mySuperPwd";

        let response = app.clone().oneshot(form(Method::POST, "/users", creds)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json(response).await,
            serde_json::json!({"email": "bob@hbtn.io", "message": "user created"})
        );

        let response = app.clone().oneshot(form(Method::POST, "/users", creds)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json(response).await,
            serde_json::json!({"message": "email already registered"})
        );

        let response = app
            .clone()
            .oneshot(form(Method::POST, "/sessions", "email=bob%40hbtn.io&password=nope"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app.clone().oneshot(form(Method::POST, "/sessions", creds)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = set_cookie(&response);
        assert!(cookie.starts_with("session_id="));
        assert_eq!(
            json(response).await,
            serde_json::json!({"email": "bob@hbtn.io", "message": "logged in"})
        );

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(&cookie).unwrap());

        let response = app.clone().oneshot(get("/profile", headers.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await, serde_json::json!({"email": "bob@hbtn.io"}));

        let mut logout = get("/sessions", headers.clone());
        *logout.method_mut() = Method::DELETE;
        let response = app.clone().oneshot(logout).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.clone().oneshot(get("/profile", headers.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let mut logout = get("/sessions", headers);
        *logout.method_mut() = Method::DELETE;
        let response = app.oneshot(logout).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_logout_without_cookie_is_not_found() {
        let (app, repo) = app(AuthType::None).await;
        seed_user(&repo, "bob@hbtn.io", "pw").await;

        let mut logout = get("/sessions", HeaderMap::new());
        *logout.method_mut() = Method::DELETE;
        let response = app.oneshot(logout).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    async fn clocked_app(
        session_duration: &str,
    ) -> (Router, Arc<SqliteAuthRepository>, Arc<ManualClock>) {
        let config = AuthConfig::from_lookup(|name| match name {
            "AUTH_TYPE" => Some("session_exp_auth".into()),
            "SESSION_DURATION" => Some(session_duration.to_string()),
            _ => None,
        })
        .unwrap();
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
        ));
        let repo = Arc::new(memory_repo().await);
        let authenticator = Authenticator::with_clock(&config, repo.clone(), clock.clone());
        let state = AppState::with_authenticator(repo.clone(), authenticator, config);
        (auth_router(state), repo, clock)
    }

    async fn api_login(app: &Router) -> HeaderMap {
        let response = app
            .clone()
            .oneshot(form(
                Method::POST,
                "/api/v1/auth_session/login",
                "email=bob%40hbtn.io&password=pw",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&set_cookie(&response)).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_expired_api_session_is_forbidden() {
        let (app, repo, clock) = clocked_app("60").await;
        seed_user(&repo, "bob@hbtn.io", "pw").await;
        let headers = api_login(&app).await;

        clock.advance(Duration::seconds(60));
        let response = app
            .clone()
            .oneshot(get("/api/v1/users/me", headers.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        clock.advance(Duration::seconds(1));
        let response = app.oneshot(get("/api/v1/users/me", headers)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_far_future_session_duration_keeps_session() {
        let (app, repo, clock) = clocked_app("1000000000000000").await;
        seed_user(&repo, "bob@hbtn.io", "pw").await;
        let headers = api_login(&app).await;

        clock.advance(Duration::days(3650));
        let response = app.oneshot(get("/api/v1/users/me", headers)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_register_with_missing_field() {
        let (app, _) = app(AuthType::None).await;
        let response = app
            .oneshot(form(Method::POST, "/users", "email=bob%40hbtn.io"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_profile_without_cookie_is_forbidden() {
        let (app, _) = app(AuthType::None).await;
        let response = app.oneshot(get("/profile", HeaderMap::new())).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_password_reset_flow() {
        let (app, repo) = app(AuthType::None).await;
        seed_user(&repo, "bob@hbtn.io", "old").await;

        let response = app
            .clone()
            .oneshot(form(Method::POST, "/reset_password", "email=nobody%40hbtn.io"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .clone()
            .oneshot(form(Method::POST, "/reset_password", "email=bob%40hbtn.io"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["email"], "bob@hbtn.io");
        let reset_token = body["reset_token"].as_str().unwrap().to_string();

        let update = format!(
            "email=bob%40hbtn.io&reset_token={reset_token}&new_password=fresh"
        );
        let response = app
            .clone()
            .oneshot(form(Method::PUT, "/reset_password", &update))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json(response).await,
            serde_json::json!({"email": "bob@hbtn.io", "message": "Password updated"})
        );

        // token is single use
        let response = app
            .clone()
            .oneshot(form(Method::PUT, "/reset_password", &update))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .clone()
            .oneshot(form(Method::POST, "/sessions", "email=bob%40hbtn.io&password=old"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(form(Method::POST, "/sessions", "email=bob%40hbtn.io&password=fresh"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_gate_with_basic_auth() {
        let (app, repo) = app(AuthType::Basic).await;
        let bob = seed_user(&repo, "bob@hbtn.io", "H0lbertonSchool98!").await;

        let response = app.clone().oneshot(get("/api/v1/status", HeaderMap::new())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await, serde_json::json!({"status": "OK"}));

        let response = app
            .clone()
            .oneshot(get("/api/v1/users/me", HeaderMap::new()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json(response).await, serde_json::json!({"error": "Unauthorized"}));

        let response = app
            .clone()
            .oneshot(get("/api/v1/users/me", basic_headers("bob@hbtn.io:nope")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(json(response).await, serde_json::json!({"error": "Forbidden"}));

        let response = app
            .oneshot(get(
                "/api/v1/users/me",
                basic_headers("bob@hbtn.io:H0lbertonSchool98!"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["id"], bob.id.to_string());
        assert_eq!(body["email"], "bob@hbtn.io");
        assert!(body.get("password_digest").is_none());
    }

    #[tokio::test]
    async fn test_excluded_error_routes() {
        let (app, _) = app(AuthType::Basic).await;

        let response = app
            .clone()
            .oneshot(get("/api/v1/unauthorized", HeaderMap::new()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app.oneshot(get("/api/v1/forbidden", HeaderMap::new())).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_session_login_errors() {
        let (app, repo) = app(AuthType::Session).await;
        seed_user(&repo, "bob@hbtn.io", "pw").await;
        let login = "/api/v1/auth_session/login";

        for (body, status, error) in [
            ("", StatusCode::BAD_REQUEST, "email missing"),
            ("email=bob%40hbtn.io", StatusCode::BAD_REQUEST, "password missing"),
            ("email=x%40hbtn.io&password=pw", StatusCode::NOT_FOUND, "no user found for this email"),
            ("email=bob%40hbtn.io&password=no", StatusCode::UNAUTHORIZED, "wrong password"),
        ] {
            let response = app.clone().oneshot(form(Method::POST, login, body)).await.unwrap();
            assert_eq!(response.status(), status, "{body}");
            assert_eq!(json(response).await, serde_json::json!({"error": error}));
        }
    }

    #[tokio::test]
    async fn test_session_login_me_logout() {
        let (app, repo) = app(AuthType::Session).await;
        let bob = seed_user(&repo, "bob@hbtn.io", "pw").await;

        let response = app
            .clone()
            .oneshot(form(
                Method::POST,
                "/api/v1/auth_session/login",
                "email=bob%40hbtn.io&password=pw",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = set_cookie(&response);
        assert!(cookie.starts_with("_my_session_id="));
        assert_eq!(json(response).await["id"], bob.id.to_string());

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(&cookie).unwrap());

        let response = app
            .clone()
            .oneshot(get("/api/v1/users/me", headers.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await["email"], "bob@hbtn.io");

        let mut logout = get("/api/v1/auth_session/logout", headers.clone());
        *logout.method_mut() = Method::DELETE;
        let response = app.clone().oneshot(logout).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await, serde_json::json!({}));

        let response = app.oneshot(get("/api/v1/users/me", headers)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_session_login_unsupported_under_basic_auth() {
        let (app, repo) = app(AuthType::Basic).await;
        seed_user(&repo, "bob@hbtn.io", "pw").await;

        let response = app
            .oneshot(form(
                Method::POST,
                "/api/v1/auth_session/login",
                "email=bob%40hbtn.io&password=pw",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn test_none_strategy_blocks_gated_routes() {
        let (app, repo) = app(AuthType::None).await;
        seed_user(&repo, "bob@hbtn.io", "pw").await;

        let response = app
            .clone()
            .oneshot(get("/api/v1/users/me", basic_headers("bob@hbtn.io:pw")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app.oneshot(get("/api/v1/status", HeaderMap::new())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

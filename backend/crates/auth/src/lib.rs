//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, clock
//! - `application/` - Use cases, strategies, session registry, config
//! - `infra/` - SQLite and in-memory store implementations
//! - `presentation/` - HTTP handlers, DTOs, router, request gate
//!
//! ## Features
//! - User registration and login by email + password
//! - Selectable request authentication: none, HTTP Basic, cookie sessions
//!   (optionally expiring, optionally persisted in the database)
//! - Password reset via one-time token
//!
//! ## Security Model
//! - Passwords hashed with Argon2id and a per-hash random salt
//! - Session tokens are 256-bit random values
//! - Expired sessions are deleted when next looked up

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::{AuthConfig, AuthType, ConfigError};
pub use application::strategy::{AuthStrategy, Authenticator};
pub use error::{AuthError, AuthResult};
pub use infra::sqlite::{MIGRATOR, SqliteAuthRepository};
pub use presentation::{AppState, auth_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

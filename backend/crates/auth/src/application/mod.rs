//! Application Layer
//!
//! Use cases, strategies and application services.

pub mod check_session;
pub mod config;
pub mod password_reset;
pub mod session_registry;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod strategy;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::{AuthConfig, AuthType, ConfigError};
pub use password_reset::PasswordResetUseCase;
pub use session_registry::SessionRegistry;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use strategy::{AuthStrategy, Authenticator, BasicAuth, NoAuth, SessionAuth};

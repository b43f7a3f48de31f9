//! Application Configuration
//!
//! Read once at startup from environment variables. Every value has a
//! default; a present but malformed value is a [`ConfigError`].

use std::str::FromStr;

use thiserror::Error;

use platform::cookie::CookieConfig;
use platform::password::PasswordPolicy;

use crate::domain::entity::session::SessionExpiration;
use crate::domain::value_object::excluded_path::{ExcludedPaths, InvalidPathPattern};

/// Cookie carrying the user service session token
pub const USER_SERVICE_COOKIE: &str = "session_id";

pub const DEFAULT_SESSION_NAME: &str = "_my_session_id";

pub const DEFAULT_EXCLUDED_PATHS: &str =
    "/api/v1/status/,/api/v1/unauthorized/,/api/v1/forbidden/,/api/v1/auth_session/login/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown AUTH_TYPE `{0}`")]
    UnknownAuthType(String),

    #[error("{name} must be an integer, got `{value}`")]
    NotAnInteger { name: &'static str, value: String },

    #[error("SESSION_DURATION `{0}` is out of range")]
    DurationOutOfRange(i64),

    #[error("{name} must be true or false, got `{value}`")]
    NotABool { name: &'static str, value: String },

    #[error("invalid PASSWORD_POLICY: {0}")]
    PasswordPolicy(String),

    #[error("invalid AUTH_EXCLUDED_PATHS: {0}")]
    ExcludedPath(#[from] InvalidPathPattern),
}

/// Authentication strategy selected by `AUTH_TYPE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthType {
    /// Gate runs but never resolves an identity
    #[default]
    None,
    Basic,
    Session,
    SessionExp,
    SessionDb,
}

impl AuthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::None => "auth",
            AuthType::Basic => "basic_auth",
            AuthType::Session => "session_auth",
            AuthType::SessionExp => "session_exp_auth",
            AuthType::SessionDb => "session_db_auth",
        }
    }
}

impl FromStr for AuthType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "auth" => Ok(AuthType::None),
            "basic_auth" => Ok(AuthType::Basic),
            "session_auth" => Ok(AuthType::Session),
            "session_exp_auth" => Ok(AuthType::SessionExp),
            "session_db_auth" => Ok(AuthType::SessionDb),
            other => Err(ConfigError::UnknownAuthType(other.to_string())),
        }
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub auth_type: AuthType,
    /// Cookie carrying the gated API session token
    pub session_name: String,
    /// Seconds; zero or negative means sessions never expire
    pub session_duration_secs: i64,
    pub excluded_paths: ExcludedPaths,
    /// Whether to set the `Secure` cookie attribute
    pub cookie_secure: bool,
    /// Applied at registration and password reset
    pub password_policy: PasswordPolicy,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            auth_type: AuthType::None,
            session_name: DEFAULT_SESSION_NAME.to_string(),
            session_duration_secs: 0,
            excluded_paths: ExcludedPaths::default(),
            cookie_secure: false,
            password_policy: PasswordPolicy::Permissive,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_type = match lookup("AUTH_TYPE") {
            Some(v) => v.parse()?,
            None => AuthType::None,
        };

        let session_duration_secs = match lookup("SESSION_DURATION") {
            Some(v) if !v.trim().is_empty() => {
                v.trim().parse().map_err(|_| ConfigError::NotAnInteger {
                    name: "SESSION_DURATION",
                    value: v.clone(),
                })?
            }
            _ => 0,
        };
        if SessionExpiration::try_from_secs(session_duration_secs).is_none() {
            return Err(ConfigError::DurationOutOfRange(session_duration_secs));
        }

        let excluded_paths = ExcludedPaths::parse_list(
            &lookup("AUTH_EXCLUDED_PATHS").unwrap_or_else(|| DEFAULT_EXCLUDED_PATHS.to_string()),
        )?;

        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(v) => parse_bool("COOKIE_SECURE", &v)?,
            None => false,
        };

        let password_policy = match lookup("PASSWORD_POLICY") {
            Some(v) => v.parse().map_err(ConfigError::PasswordPolicy)?,
            None => PasswordPolicy::Permissive,
        };

        Ok(Self {
            auth_type,
            session_name: lookup("SESSION_NAME")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_SESSION_NAME.to_string()),
            session_duration_secs,
            excluded_paths,
            cookie_secure,
            password_policy,
            password_pepper: lookup("PASSWORD_PEPPER")
                .filter(|v| !v.is_empty())
                .map(String::into_bytes),
        })
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Expiration applied by the session strategies
    ///
    /// Plain session auth never expires regardless of `SESSION_DURATION`.
    pub fn session_expiration(&self) -> SessionExpiration {
        match self.auth_type {
            AuthType::SessionExp | AuthType::SessionDb => {
                SessionExpiration::from_secs(self.session_duration_secs)
            }
            _ => SessionExpiration::Never,
        }
    }

    /// Cookie issued by the gated API login
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig::session(self.session_name.clone())
            .with_secure(self.cookie_secure)
            .with_max_age(self.session_expiration().as_secs().unwrap_or(0))
    }

    /// Cookie issued by the user service login
    pub fn user_service_cookie(&self) -> CookieConfig {
        CookieConfig::session(USER_SERVICE_COOKIE).with_secure(self.cookie_secure)
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::NotABool {
            name,
            value: value.to_string(),
        }),
    }
}

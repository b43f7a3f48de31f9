//! API DTOs (Data Transfer Objects)
//!
//! Request bodies are `application/x-www-form-urlencoded`. Every field is
//! optional so a missing field reaches the handler instead of being
//! rejected by the extractor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Requests
// ============================================================================

/// `email` + `password` form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Reset token request form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetTokenForm {
    pub email: Option<String>,
}

/// Password update form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePasswordForm {
    pub email: Option<String>,
    pub reset_token: Option<String>,
    pub new_password: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `{"email": ..., "message": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessageResponse {
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetTokenResponse {
    pub email: String,
    pub reset_token: String,
}

/// `{"error": ...}` body used by the gated API
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Public view of a user; never includes digests or tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

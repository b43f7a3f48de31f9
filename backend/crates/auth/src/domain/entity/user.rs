//! User Entity
//!
//! An account in the credential store.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, password_digest::PasswordDigest, user_id::UserId,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Opaque unique identifier
    pub id: UserId,
    /// Login identity (unique)
    pub email: Email,
    /// Salted password digest, never clear text
    pub password_digest: PasswordDigest,
    /// Token issued by the user service login, cleared on logout
    pub session_token: Option<String>,
    /// Outstanding password reset token
    pub reset_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(email: Email, password_digest: PasswordDigest) -> Self {
        let now = Utc::now();

        Self {
            id: UserId::new(),
            email,
            password_digest,
            session_token: None,
            reset_token: None,
            created_at: now,
            updated_at: now,
        }
    }
}

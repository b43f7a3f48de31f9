//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the auth layer:
//! - Random session tokens and Base64 helpers
//! - Password hashing (Argon2id) and optional password policy
//! - Cookie parsing and `Set-Cookie` building
//! - PII redaction of rendered log lines

pub mod cookie;
pub mod crypto;
pub mod password;
pub mod redact;

//! Value Object Module

pub mod email;
pub mod excluded_path;
pub mod password_digest;
pub mod session_token;
pub mod user_id;

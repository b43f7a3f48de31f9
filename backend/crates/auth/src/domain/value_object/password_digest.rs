//! Password Digest Value Object
//!
//! The stored form of a user's password. Wraps `platform::password` so the
//! domain never handles clear text beyond hashing and verification.

use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};

/// Salted Argon2id digest of a password, in PHC string form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(HashedPassword);

impl PasswordDigest {
    /// Hash a clear text password
    pub fn from_clear(
        password: &ClearTextPassword,
        pepper: Option<&[u8]>,
    ) -> Result<Self, PasswordHashError> {
        password.hash(pepper).map(Self)
    }

    /// Restore from a stored PHC string
    pub fn from_db(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc).map(Self)
    }

    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(password, pepper)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_phc_string()
    }
}

//! Password Hashing and Verification
//!
//! - Argon2id hashing with a fresh random salt per call
//! - Zeroization of clear text on drop
//! - Optional pepper (application-wide secret)
//!
//! The hasher accepts any string, including the empty one. Length and
//! complexity rules live in [`PasswordPolicy`] and are applied by callers
//! that want them.

use std::fmt;
use std::str::FromStr;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum password length under [`PasswordPolicy::Nist`] (NIST: SHALL be at least 8)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length under [`PasswordPolicy::Nist`] (NIST: SHOULD permit at least 64)
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Not `Clone`, and `Debug` output is redacted, so the value cannot leak
/// into logs by accident.
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("pw".to_string());
/// let hashed = password.hash(None).unwrap();
/// assert!(hashed.verify(&password, None));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut bytes = self.0.as_bytes().to_vec();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash the password using Argon2id
    ///
    /// Two calls with the same input produce different digests; both verify.
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let mut password_bytes = self.peppered(pepper);

        // Generate random salt (128 bits = 16 bytes)
        let salt = SaltString::generate(OsRng);

        // OWASP recommended Argon2id parameters:
        // m=19456 (19 MiB), t=2, p=1
        let result = Argon2::default()
            .hash_password(&password_bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        password_bytes.zeroize();
        result
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format (algorithm, params, salt, hash)
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// The salt is read back from the PHC string. Argon2 compares in
    /// constant time.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        let mut password_bytes = password.peppered(pepper);
        let valid = Argon2::default()
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok();
        password_bytes.zeroize();
        valid
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Password Policy
// ============================================================================

/// Caller-selected password policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordPolicy {
    /// Accept anything, including the empty string
    #[default]
    Permissive,
    /// NIST SP 800-63B style rules
    Nist,
}

impl PasswordPolicy {
    /// Check a password against this policy
    pub fn check(&self, password: &ClearTextPassword) -> Result<(), PasswordPolicyError> {
        match self {
            PasswordPolicy::Permissive => Ok(()),
            PasswordPolicy::Nist => check_nist(password.as_str()),
        }
    }
}

impl FromStr for PasswordPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" | "none" => Ok(PasswordPolicy::Permissive),
            "nist" => Ok(PasswordPolicy::Nist),
            other => Err(format!("unknown password policy: {other}")),
        }
    }
}

fn check_nist(raw: &str) -> Result<(), PasswordPolicyError> {
    let normalized: String = raw.nfkc().collect();
    if normalized.chars().all(char::is_whitespace) {
        return Err(PasswordPolicyError::EmptyOrWhitespace);
    }

    match normalized.chars().count() {
        n if n < MIN_PASSWORD_LENGTH => Err(PasswordPolicyError::TooShort {
            min: MIN_PASSWORD_LENGTH,
            actual: n,
        }),
        n if n > MAX_PASSWORD_LENGTH => Err(PasswordPolicyError::TooLong {
            max: MAX_PASSWORD_LENGTH,
            actual: n,
        }),
        _ if normalized.chars().any(is_forbidden_control) => {
            Err(PasswordPolicyError::InvalidCharacter)
        }
        _ if is_predictable(&normalized) => Err(PasswordPolicyError::CommonPattern),
        _ => Ok(()),
    }
}

fn is_forbidden_control(ch: char) -> bool {
    ch.is_control() && !matches!(ch, '\t' | '\n')
}

const KEYBOARD_RUNS: &[&str] = &["qwerty", "azerty", "asdfgh", "zxcvbn", "1qaz2wsx"];

const DENYLIST: &[&str] = &[
    "password",
    "password1",
    "password123",
    "passw0rd",
    "abcdefgh",
    "letmein1",
    "welcome1",
    "admin123",
    "changeme",
    "iloveyou",
    "trustno1",
];

/// Repeated characters, digit runs, keyboard runs and well-known passwords
fn is_predictable(password: &str) -> bool {
    let lower = password.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();

    chars.windows(2).all(|w| w[0] == w[1])
        || is_digit_run(&chars)
        || KEYBOARD_RUNS.iter().any(|run| lower.contains(run))
        || DENYLIST.contains(&lower.as_str())
}

/// At least four digits stepping by +1 or -1, wrapping between 9 and 0
fn is_digit_run(chars: &[char]) -> bool {
    let Some(digits) = chars
        .iter()
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
    else {
        return false;
    };
    if digits.len() < 4 {
        return false;
    }

    let step = |a: u32, b: u32| (b + 10 - a) % 10;
    let first = step(digits[0], digits[1]);
    matches!(first, 1 | 9) && digits.windows(2).all(|w| step(w[0], w[1]) == first)
}

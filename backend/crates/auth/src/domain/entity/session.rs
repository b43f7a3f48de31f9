//! Session Record Entity
//!
//! Binds a session token to the user it was issued for.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{session_token::SessionToken, user_id::UserId};

/// How long a session stays valid after creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionExpiration {
    #[default]
    Never,
    After(Duration),
}

impl SessionExpiration {
    /// Seconds from configuration; zero or negative means sessions never expire
    ///
    /// `None` when `secs` is too large for a [`Duration`].
    pub fn try_from_secs(secs: i64) -> Option<Self> {
        if secs <= 0 {
            return Some(SessionExpiration::Never);
        }
        Duration::try_seconds(secs).map(SessionExpiration::After)
    }

    /// As [`Self::try_from_secs`], with unrepresentable durations treated as `Never`
    pub fn from_secs(secs: i64) -> Self {
        Self::try_from_secs(secs).unwrap_or(SessionExpiration::Never)
    }

    pub fn as_secs(&self) -> Option<i64> {
        match self {
            SessionExpiration::Never => None,
            SessionExpiration::After(d) => Some(d.num_seconds()),
        }
    }
}

/// Session record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub token: SessionToken,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(token: SessionToken, user_id: UserId, created_at: DateTime<Utc>) -> Self {
        Self {
            token,
            user_id,
            created_at,
        }
    }

    /// Expired iff `now` is strictly later than `created_at + d`
    ///
    /// A deadline past the last representable instant is never reached.
    pub fn is_expired_at(&self, now: DateTime<Utc>, expiration: SessionExpiration) -> bool {
        match expiration {
            SessionExpiration::Never => false,
            SessionExpiration::After(d) => self
                .created_at
                .checked_add_signed(d)
                .is_some_and(|deadline| now > deadline),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_at(created_at: DateTime<Utc>) -> SessionRecord {
        SessionRecord::new(SessionToken::generate(), UserId::new(), created_at)
    }

    #[test]
    fn test_non_positive_duration_never_expires() {
        assert_eq!(SessionExpiration::from_secs(0), SessionExpiration::Never);
        assert_eq!(SessionExpiration::from_secs(-5), SessionExpiration::Never);
        assert_eq!(SessionExpiration::from_secs(60).as_secs(), Some(60));

        let record = record_at(Utc::now() - Duration::days(3650));
        assert!(!record.is_expired_at(Utc::now(), SessionExpiration::Never));
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let created = Utc::now();
        let record = record_at(created);
        let policy = SessionExpiration::from_secs(60);

        assert!(!record.is_expired_at(created + Duration::seconds(59), policy));
        assert!(!record.is_expired_at(created + Duration::seconds(60), policy));
        assert!(record.is_expired_at(
            created + Duration::seconds(60) + Duration::milliseconds(1),
            policy
        ));
    }

    #[test]
    fn test_huge_duration_does_not_overflow() {
        assert_eq!(SessionExpiration::try_from_secs(i64::MAX), None);
        assert_eq!(SessionExpiration::from_secs(i64::MAX), SessionExpiration::Never);

        let policy = SessionExpiration::from_secs(1_000_000_000_000_000);
        assert!(matches!(policy, SessionExpiration::After(_)));

        let now = Utc::now();
        let record = record_at(now);
        assert!(!record.is_expired_at(now + Duration::days(365), policy));
    }
}

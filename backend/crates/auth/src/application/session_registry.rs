//! Session Registry
//!
//! Issues, resolves and destroys session tokens over a records
//! collaborator. Expired records are removed the moment they are found;
//! there is no background sweep.

use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::entity::session::{SessionExpiration, SessionRecord};
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{session_token::SessionToken, user_id::UserId};
use crate::error::AuthResult;

pub struct SessionRegistry<S>
where
    S: SessionRepository,
{
    records: Arc<S>,
    expiration: SessionExpiration,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for SessionRegistry<S>
where
    S: SessionRepository,
{
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            expiration: self.expiration,
            clock: self.clock.clone(),
        }
    }
}

impl<S> SessionRegistry<S>
where
    S: SessionRepository + Send + Sync,
{
    pub fn with_clock(records: Arc<S>, expiration: SessionExpiration, clock: Arc<dyn Clock>) -> Self {
        Self {
            records,
            expiration,
            clock,
        }
    }

    /// Issue a fresh token for `user_id`
    pub async fn create(&self, user_id: &UserId) -> AuthResult<SessionToken> {
        let record = SessionRecord::new(SessionToken::generate(), *user_id, self.clock.now());
        self.records.insert(&record).await?;

        tracing::debug!(user_id = %user_id, "Session created");
        Ok(record.token)
    }

    /// User bound to `token`, if the session exists and has not expired
    pub async fn resolve(&self, token: &str) -> AuthResult<Option<UserId>> {
        let Some(record) = self.records.find(token).await? else {
            return Ok(None);
        };

        if record.is_expired_at(self.clock.now(), self.expiration) {
            self.records.delete(token).await?;
            tracing::debug!(user_id = %record.user_id, "Expired session removed");
            return Ok(None);
        }

        Ok(Some(record.user_id))
    }

    /// `true` if a session was removed
    pub async fn destroy(&self, token: &str) -> AuthResult<bool> {
        let removed = self.records.delete(token).await?;
        if removed {
            tracing::debug!("Session destroyed");
        }
        Ok(removed)
    }
}

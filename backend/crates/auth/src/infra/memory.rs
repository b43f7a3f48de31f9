//! In-process session records

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::session::SessionRecord;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Session records held in memory and lost on restart
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionRepository {
    records: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

impl SessionRepository for MemorySessionRepository {
    async fn insert(&self, record: &SessionRecord) -> AuthResult<()> {
        self.records
            .write()
            .await
            .insert(record.token.as_str().to_string(), record.clone());
        Ok(())
    }

    async fn find(&self, token: &str) -> AuthResult<Option<SessionRecord>> {
        Ok(self.records.read().await.get(token).cloned())
    }

    async fn delete(&self, token: &str) -> AuthResult<bool> {
        Ok(self.records.write().await.remove(token).is_some())
    }
}

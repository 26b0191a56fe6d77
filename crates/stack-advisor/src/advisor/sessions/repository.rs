use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::walker::Walker;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Stored session: the walker plus bookkeeping timestamps.
#[derive(Debug)]
pub struct SessionRecord {
    pub id: SessionId,
    pub walker: Walker,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Each session gets its own lock so answers for one session are applied one
/// at a time while other sessions proceed independently.
pub type SessionHandle = Arc<Mutex<SessionRecord>>;

/// Storage abstraction so the service can be exercised in isolation.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionHandle, RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionHandle>, RepositoryError>;
    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError>;
    /// Drops sessions last updated before `cutoff`, returning how many went.
    fn remove_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;

use super::super::catalog::Catalog;
use super::super::domain::{AnswerOutcome, Candidate};
use super::super::questions::{Question, QuestionBank};
use super::super::walker::{Walker, WalkerState};
use super::repository::{
    RepositoryError, SessionHandle, SessionId, SessionRecord, SessionRepository,
};

/// Service handing out one walker per advisory session.
///
/// Session ids are sequential per service and therefore guessable; they
/// identify a session, they do not authorize access to it.
pub struct AdvisorSessionService<R> {
    repository: Arc<R>,
    catalog: Arc<Catalog>,
    bank: Arc<QuestionBank>,
    sequence: AtomicU64,
}

/// Public projection of a session for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub status_label: &'static str,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: WalkerState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Arc<Candidate>>,
    pub path_summary: Vec<String>,
}

impl SessionRecord {
    pub fn view(&self) -> SessionView {
        let state = self.walker.current_state();
        SessionView {
            session_id: self.id.clone(),
            status_label: state.status.label(),
            started_at: self.started_at,
            updated_at: self.updated_at,
            next_question: self.walker.next_question().cloned(),
            recommendation: self.walker.final_recommendation(),
            path_summary: self.walker.path_summary(),
            state,
        }
    }
}

impl<R> AdvisorSessionService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, catalog: Arc<Catalog>) -> Self {
        Self::with_bank(repository, catalog, Arc::new(QuestionBank::standard()))
    }

    pub fn with_bank(repository: Arc<R>, catalog: Arc<Catalog>, bank: Arc<QuestionBank>) -> Self {
        Self {
            repository,
            catalog,
            bank,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_session_id(&self) -> SessionId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        SessionId(format!("session-{id:06}"))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Open a fresh session over the full catalog.
    pub fn start(&self) -> Result<SessionView, SessionServiceError> {
        let now = Utc::now();
        let record = SessionRecord {
            id: self.next_session_id(),
            walker: Walker::new(&self.catalog, Arc::clone(&self.bank)),
            started_at: now,
            updated_at: now,
        };

        let handle = self.repository.insert(record)?;
        let record = lock(&handle)?;
        info!(
            session_id = record.id.0.as_str(),
            candidates = self.catalog.len(),
            "advisor session started"
        );
        Ok(record.view())
    }

    pub fn view(&self, id: &SessionId) -> Result<SessionView, SessionServiceError> {
        let handle = self.handle(id)?;
        let record = lock(&handle)?;
        Ok(record.view())
    }

    pub fn next_question(&self, id: &SessionId) -> Result<Option<Question>, SessionServiceError> {
        let handle = self.handle(id)?;
        let record = lock(&handle)?;
        Ok(record.walker.next_question().cloned())
    }

    /// Apply an answer. Unlike the walker, the service reports ignored answers
    /// so HTTP callers learn about protocol mistakes.
    pub fn answer(
        &self,
        id: &SessionId,
        question_id: &str,
        answer: &str,
    ) -> Result<SessionView, SessionServiceError> {
        let handle = self.handle(id)?;
        let mut record = lock(&handle)?;

        match record.walker.record_answer(question_id, answer) {
            AnswerOutcome::Applied { .. } => {
                record.updated_at = Utc::now();
                Ok(record.view())
            }
            AnswerOutcome::UnknownQuestion => Err(SessionServiceError::UnknownQuestion(
                question_id.to_string(),
            )),
            AnswerOutcome::AlreadyAnswered => Err(SessionServiceError::AlreadyAnswered(
                question_id.to_string(),
            )),
        }
    }

    pub fn reset(&self, id: &SessionId) -> Result<SessionView, SessionServiceError> {
        let handle = self.handle(id)?;
        let mut record = lock(&handle)?;
        record.walker.reset();
        record.updated_at = Utc::now();
        Ok(record.view())
    }

    pub fn end(&self, id: &SessionId) -> Result<(), SessionServiceError> {
        self.repository.remove(id)?;
        Ok(())
    }

    /// Removes sessions untouched for longer than `max_idle`.
    pub fn expire_idle(&self, max_idle: Duration) -> Result<usize, SessionServiceError> {
        let cutoff = Utc::now() - max_idle;
        let removed = self.repository.remove_idle(cutoff)?;
        if removed > 0 {
            info!(removed, "expired idle advisor sessions");
        }
        Ok(removed)
    }

    fn handle(&self, id: &SessionId) -> Result<SessionHandle, SessionServiceError> {
        let handle = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(handle)
    }
}

fn lock(handle: &SessionHandle) -> Result<MutexGuard<'_, SessionRecord>, SessionServiceError> {
    handle
        .lock()
        .map_err(|_| RepositoryError::Unavailable("session lock poisoned".to_string()).into())
}

/// Error raised by the session service.
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error("question '{0}' is not part of the question bank")]
    UnknownQuestion(String),
    #[error("question '{0}' was already answered in this session")]
    AlreadyAnswered(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

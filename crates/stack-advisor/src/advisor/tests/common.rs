use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::advisor::catalog::Catalog;
use crate::advisor::domain::Candidate;
use crate::advisor::questions::{Question, QuestionBank, QuestionKind, ScoringKind};
use crate::advisor::sessions::{
    AdvisorSessionService, RepositoryError, SessionHandle, SessionId, SessionRecord,
    SessionRepository,
};

pub(super) fn stack(name: &str, tags: &[&str]) -> Candidate {
    Candidate {
        name: name.to_string(),
        description: format!("{name} description"),
        url: format!("https://example.com/{}", name.to_lowercase().replace(' ', "-")),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        reasons: None,
    }
}

pub(super) fn shared(candidates: Vec<Candidate>) -> Vec<Arc<Candidate>> {
    candidates.into_iter().map(Arc::new).collect()
}

pub(super) fn catalog(candidates: Vec<Candidate>) -> Catalog {
    Catalog::from_candidates(candidates).expect("fixture names unique")
}

/// Four stacks, exactly two of them tagged `frontend`.
pub(super) fn four_stacks() -> Vec<Candidate> {
    vec![
        stack("Vite + React SPA", &["frontend", "react", "javascript"]),
        stack("Django", &["backend", "python", "django", "auth"]),
        stack("SvelteKit", &["frontend", "svelte"]),
        stack("Express API", &["backend", "nodejs", "javascript"]),
    ]
}

pub(super) fn boolean(id: &'static str, scoring: ScoringKind) -> Question {
    Question {
        id,
        text: "Fixture question?",
        description: None,
        kind: QuestionKind::Boolean,
        answers: vec!["Yes", "No"],
        scoring,
    }
}

pub(super) fn frontend_question() -> Question {
    Question {
        id: "primary_focus",
        text: "Is this primarily a frontend/UI project?",
        description: None,
        kind: QuestionKind::Boolean,
        answers: vec!["Yes", "No"],
        scoring: ScoringKind::Tag("frontend"),
    }
}

pub(super) fn deployment_question() -> Question {
    Question {
        id: "deployment_target",
        text: "Where will you primarily deploy?",
        description: None,
        kind: QuestionKind::Multiple,
        answers: vec!["Edge", "Cloud", "Self-hosted"],
        scoring: ScoringKind::TagRoutes {
            routes: &[&["vercel"], &["aws"], &["docker"]],
            fallback: 2,
        },
    }
}

/// Bank whose questions cannot tell any fixture stack apart.
pub(super) fn blind_bank() -> Arc<QuestionBank> {
    Arc::new(
        QuestionBank::new(vec![
            boolean("always_yes", ScoringKind::Fixed(1.0)),
            boolean("always_no", ScoringKind::Fixed(0.0)),
            boolean("coin_edge", ScoringKind::Fixed(0.5)),
        ])
        .expect("blind bank valid"),
    )
}

pub(super) fn bank(questions: Vec<Question>) -> Arc<QuestionBank> {
    Arc::new(QuestionBank::new(questions).expect("fixture bank valid"))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) sessions: Arc<Mutex<HashMap<SessionId, SessionHandle>>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionHandle, RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        let id = record.id.clone();
        let handle = Arc::new(Mutex::new(record));
        guard.insert(id, handle.clone());
        Ok(handle)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionHandle>, RepositoryError> {
        let guard = self.sessions.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn remove_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        let before = guard.len();
        guard.retain(|_, handle| {
            handle.lock().expect("session mutex poisoned").updated_at >= cutoff
        });
        Ok(before - guard.len())
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _record: SessionRecord) -> Result<SessionHandle, RepositoryError> {
        Err(RepositoryError::Unavailable("session store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionHandle>, RepositoryError> {
        Err(RepositoryError::Unavailable("session store offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("session store offline".to_string()))
    }

    fn remove_idle(&self, _cutoff: DateTime<Utc>) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("session store offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    AdvisorSessionService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AdvisorSessionService::new(repository.clone(), Arc::new(Catalog::standard()));
    (service, repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One recommendation outcome. Loaded once from the content source and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasons: Option<Vec<String>>,
}

impl Candidate {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate_tag| candidate_tag == tag)
    }

    pub fn has_any_tag(&self, tags: &[&str]) -> bool {
        self.tags
            .iter()
            .any(|candidate_tag| tags.contains(&candidate_tag.as_str()))
    }
}

/// One answered question, recorded in the order answers arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question_id: String,
    pub answer: String,
    pub candidates_remaining: usize,
}

/// Where a session stands. `Converged` and `Empty` are both "complete" in the
/// at-most-one sense but only `Converged` carries a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Converged,
    Empty,
    Exhausted,
}

impl SessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Converged => "Converged",
            Self::Empty => "No Match",
            Self::Exhausted => "Exhausted",
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// Where a session stands, carrying the recommendation once one is found.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Found(Arc<Candidate>),
    Empty,
    Exhausted,
    Active,
}

impl SessionOutcome {
    pub fn status(&self) -> SessionStatus {
        match self {
            Self::Found(_) => SessionStatus::Converged,
            Self::Empty => SessionStatus::Empty,
            Self::Exhausted => SessionStatus::Exhausted,
            Self::Active => SessionStatus::Active,
        }
    }
}

/// Result of feeding an answer to a walker. Ignored answers leave the session
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Applied { remaining: usize },
    UnknownQuestion,
    AlreadyAnswered,
}

impl AnswerOutcome {
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

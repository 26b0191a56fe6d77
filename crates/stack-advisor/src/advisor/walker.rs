use super::catalog::Catalog;
use super::domain::{AnswerOutcome, Candidate, HistoryEntry, SessionOutcome, SessionStatus};
use super::filter::apply_answer;
use super::questions::{Question, QuestionBank};
use super::selector::select_best;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Read-only snapshot of a walker, safe to hand to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkerState {
    pub remaining_candidates: Vec<Arc<Candidate>>,
    pub remaining_count: usize,
    pub asked_count: usize,
    pub history: Vec<HistoryEntry>,
    /// At most one candidate left. Zero survivors also count as complete; use
    /// `status` to tell a recommendation apart from an over-filtered session.
    pub is_complete: bool,
    pub status: SessionStatus,
}

/// Session controller for one user's run through the question flow.
///
/// Not meant for concurrent mutation; callers sharing a walker must serialize
/// `record_answer`.
#[derive(Debug, Clone)]
pub struct Walker {
    catalog: Vec<Arc<Candidate>>,
    bank: Arc<QuestionBank>,
    remaining: Vec<Arc<Candidate>>,
    asked: HashSet<String>,
    history: Vec<HistoryEntry>,
}

impl Walker {
    pub fn new(catalog: &Catalog, bank: Arc<QuestionBank>) -> Self {
        let candidates = catalog.candidates().to_vec();
        Self {
            remaining: candidates.clone(),
            catalog: candidates,
            bank,
            asked: HashSet::new(),
            history: Vec::new(),
        }
    }

    pub fn with_standard_questions(catalog: &Catalog) -> Self {
        Self::new(catalog, Arc::new(QuestionBank::standard()))
    }

    pub fn next_question(&self) -> Option<&Question> {
        select_best(&self.bank, &self.remaining, &self.asked)
    }

    /// Applies an answer. Unknown or already answered question ids are logged
    /// and ignored so the session is never corrupted by a bad caller.
    pub fn record_answer(&mut self, question_id: &str, answer: &str) -> AnswerOutcome {
        let Some(question) = self.bank.get(question_id) else {
            warn!(question_id, "ignoring answer for unknown question");
            return AnswerOutcome::UnknownQuestion;
        };

        if self.asked.contains(question_id) {
            warn!(question_id, "ignoring repeated answer for question");
            return AnswerOutcome::AlreadyAnswered;
        }

        let before = self.remaining.len();
        self.remaining = apply_answer(&self.remaining, question, answer);
        self.asked.insert(question.id.to_string());

        let remaining = self.remaining.len();
        self.history.push(HistoryEntry {
            question_id: question.id.to_string(),
            answer: answer.to_string(),
            candidates_remaining: remaining,
        });

        debug!(question_id, answer, before, remaining, "applied answer");
        if let Some(recommendation) = self.final_recommendation() {
            info!(
                stack = recommendation.name.as_str(),
                questions = self.history.len(),
                "session converged on a recommendation"
            );
        }

        AnswerOutcome::Applied { remaining }
    }

    pub fn status(&self) -> SessionStatus {
        match self.remaining.len() {
            0 => SessionStatus::Empty,
            1 => SessionStatus::Converged,
            _ if self.bank.unasked(&self.asked).next().is_none() => SessionStatus::Exhausted,
            _ => SessionStatus::Active,
        }
    }

    pub fn outcome(&self) -> SessionOutcome {
        match self.status() {
            SessionStatus::Converged => match self.final_recommendation() {
                Some(candidate) => SessionOutcome::Found(candidate),
                None => SessionOutcome::Empty,
            },
            SessionStatus::Empty => SessionOutcome::Empty,
            SessionStatus::Exhausted => SessionOutcome::Exhausted,
            SessionStatus::Active => SessionOutcome::Active,
        }
    }

    pub fn current_state(&self) -> WalkerState {
        WalkerState {
            remaining_candidates: self.remaining.clone(),
            remaining_count: self.remaining.len(),
            asked_count: self.asked.len(),
            history: self.history.clone(),
            is_complete: self.remaining.len() <= 1,
            status: self.status(),
        }
    }

    /// The sole survivor, if exactly one candidate remains. Ambiguous and empty
    /// sessions yield `None`.
    pub fn final_recommendation(&self) -> Option<Arc<Candidate>> {
        match self.remaining.as_slice() {
            [only] => Some(Arc::clone(only)),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.remaining = self.catalog.clone();
        self.asked.clear();
        self.history.clear();
    }

    pub fn remaining(&self) -> &[Arc<Candidate>] {
        &self.remaining
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn question_bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// History rendered as "question → answer" lines, in asking order.
    pub fn path_summary(&self) -> Vec<String> {
        self.history
            .iter()
            .filter_map(|entry| {
                self.bank
                    .get(&entry.question_id)
                    .map(|question| format!("{} → {}", question.text, entry.answer))
            })
            .collect()
    }
}

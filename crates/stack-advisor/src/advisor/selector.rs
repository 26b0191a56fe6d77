use super::domain::Candidate;
use super::gain::information_gain;
use super::questions::{Question, QuestionBank};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Highest-gain unasked question, first in bank order on ties. `None` once the
/// candidates have converged or every question has been asked.
pub fn select_best<'b>(
    bank: &'b QuestionBank,
    candidates: &[Arc<Candidate>],
    asked: &HashSet<String>,
) -> Option<&'b Question> {
    if candidates.len() <= 1 {
        return None;
    }

    let mut best: Option<(&Question, f64)> = None;
    let unasked = bank
        .questions()
        .iter()
        .filter(|question| !asked.contains(question.id));
    for question in unasked {
        let gain = information_gain(question, candidates);
        match best {
            Some((_, best_gain)) if gain <= best_gain => {}
            _ => best = Some((question, gain)),
        }
    }

    if let Some((question, gain)) = best {
        debug!(
            question = question.id,
            gain,
            candidates = candidates.len(),
            "selected next question"
        );
    }

    best.map(|(question, _)| question)
}

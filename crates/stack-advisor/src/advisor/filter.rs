use super::domain::Candidate;
use super::questions::Question;
use std::sync::Arc;

/// Candidates whose expected answer matches `answer` exactly. The input slice
/// is left as is; an undeclared answer matches nothing.
pub fn apply_answer(
    candidates: &[Arc<Candidate>],
    question: &Question,
    answer: &str,
) -> Vec<Arc<Candidate>> {
    candidates
        .iter()
        .filter(|candidate| question.expected_answer(candidate) == Some(answer))
        .cloned()
        .collect()
}

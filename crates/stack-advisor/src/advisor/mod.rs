//! Adaptive questioning engine.
//!
//! A [`Walker`] keeps the candidates still in play, asks the unasked question
//! with the highest [`information_gain`], and narrows the candidates with each
//! answer until one stack remains or the question bank runs out.

pub mod catalog;
pub mod domain;
mod filter;
mod gain;
pub mod questions;
mod selector;
pub mod sessions;
mod walker;

#[cfg(test)]
mod tests;

pub use catalog::{Catalog, CatalogError};
pub use domain::{AnswerOutcome, Candidate, HistoryEntry, SessionOutcome, SessionStatus};
pub use filter::apply_answer;
pub use gain::{entropy, information_gain, minimum_questions};
pub use questions::{Question, QuestionBank, QuestionBankError, QuestionKind, ScoringKind};
pub use selector::select_best;
pub use walker::{Walker, WalkerState};

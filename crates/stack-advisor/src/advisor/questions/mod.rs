mod scoring;
mod standard;

pub use scoring::{ScoringKind, POSITIVE_THRESHOLD};

use super::domain::Candidate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Boolean,
    Multiple,
}

impl QuestionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Boolean => "Yes / No",
            Self::Multiple => "Multiple Choice",
        }
    }
}

/// Diagnostic question. For boolean questions `answers[0]` is the positive
/// answer and `answers[1]` the negative one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub answers: Vec<&'static str>,
    #[serde(skip)]
    pub scoring: ScoringKind,
}

impl Question {
    /// Index of the answer group this candidate falls into.
    pub fn classify(&self, candidate: &Candidate) -> usize {
        match self.kind {
            QuestionKind::Boolean => {
                if self.scoring.affinity(candidate) > POSITIVE_THRESHOLD {
                    0
                } else {
                    1
                }
            }
            QuestionKind::Multiple => self.scoring.route(candidate, self.answers.len()),
        }
    }

    /// The declared answer a candidate is expected to give, if the question
    /// declares one at the classified index.
    pub fn expected_answer(&self, candidate: &Candidate) -> Option<&'static str> {
        self.answers.get(self.classify(candidate)).copied()
    }

    pub fn declares(&self, answer: &str) -> bool {
        self.answers.contains(&answer)
    }
}

/// Ordered, validated set of questions. Order decides ties during selection.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id) {
                return Err(QuestionBankError::DuplicateId(question.id.to_string()));
            }
            validate_question(question)?;
        }
        Ok(Self { questions })
    }

    /// Built-in bank tuned against [`super::Catalog::standard`].
    pub fn standard() -> Self {
        Self {
            questions: standard::standard_questions(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Questions not yet asked, in bank order.
    pub fn unasked<'a, 's>(
        &'a self,
        asked: &'s HashSet<String>,
    ) -> impl Iterator<Item = &'a Question> + 's
    where
        'a: 's,
    {
        self.questions
            .iter()
            .filter(move |question| !asked.contains(question.id))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn validate_question(question: &Question) -> Result<(), QuestionBankError> {
    let id = question.id.to_string();
    match question.kind {
        QuestionKind::Boolean if question.answers.len() != 2 => {
            return Err(QuestionBankError::BooleanArity {
                id,
                count: question.answers.len(),
            });
        }
        QuestionKind::Multiple if question.answers.len() < 2 => {
            return Err(QuestionBankError::TooFewAnswers { id });
        }
        _ => {}
    }

    let mut answers = HashSet::new();
    for answer in &question.answers {
        if !answers.insert(*answer) {
            return Err(QuestionBankError::DuplicateAnswer {
                id,
                answer: answer.to_string(),
            });
        }
    }

    if let ScoringKind::TagRoutes { routes, fallback } = question.scoring {
        let declared = question.answers.len();
        if routes.len() > declared || fallback >= declared {
            return Err(QuestionBankError::RouteOutOfRange {
                id,
                routes: routes.len(),
                fallback,
                declared,
            });
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionBankError {
    #[error("question id '{0}' appears more than once")]
    DuplicateId(String),
    #[error("boolean question '{id}' must declare exactly two answers, found {count}")]
    BooleanArity { id: String, count: usize },
    #[error("multiple-choice question '{id}' must declare at least two answers")]
    TooFewAnswers { id: String },
    #[error("question '{id}' declares answer '{answer}' twice")]
    DuplicateAnswer { id: String, answer: String },
    #[error(
        "question '{id}' routes {routes} answer(s) with fallback {fallback} but declares {declared}"
    )]
    RouteOutOfRange {
        id: String,
        routes: usize,
        fallback: usize,
        declared: usize,
    },
}

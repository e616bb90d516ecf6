//! Question records and the validated create payload.

use crate::domain::CategoryId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// Payload for creating a question.
///
/// All fields are required and unknown fields are rejected at parse time.
/// Call [`NewQuestion::validate`] before inserting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be blank")]
    Blank(&'static str),
}

impl NewQuestion {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: i64,
        difficulty: i64,
    ) -> Self {
        NewQuestion {
            question: question.into(),
            answer: answer.into(),
            category: CategoryId(category),
            difficulty,
        }
    }

    /// Reject whitespace-only text. Text is stored exactly as sent and any
    /// integer difficulty is accepted.
    pub fn validate(self) -> Result<Self, ValidationError> {
        if self.question.trim().is_empty() {
            return Err(ValidationError::Blank("question"));
        }
        if self.answer.trim().is_empty() {
            return Err(ValidationError::Blank("answer"));
        }
        Ok(self)
    }
}

/// Row restriction applied before pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionFilter {
    All,
    /// Case-insensitive substring match on the question text.
    Search(String),
    Category(i64),
}

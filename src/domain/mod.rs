//! Domain types for the trivia API.
//!
//! This module provides:
//! - Category and Question records with their JSON shapes
//! - `NewQuestion`, the validated create payload
//! - Fixed-size pagination helpers

pub mod category;
pub mod pagination;
pub mod question;

pub use category::{Category, CategoryId, CategoryMap, DEFAULT_CATEGORY_TYPES};
pub use pagination::{Page, PageRequest, QUESTIONS_PER_PAGE};
pub use question::{NewQuestion, Question, QuestionFilter, ValidationError};

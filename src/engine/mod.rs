//! Selection logic served by the API.

pub mod quiz;

pub use quiz::{pick_uniform, QuizSelector};

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;

pub use config::Config;
pub use db::{init_db, Repository, TransactionError, TransactionalExecutor};
pub use domain::{Category, NewQuestion, Page, PageRequest, Question, QuestionFilter};
pub use engine::QuizSelector;
pub use error::AppError;

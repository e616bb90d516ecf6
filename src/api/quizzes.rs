use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::{CategoryId, Question};
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<i64>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

/// The category chosen in the client; id 0 stands for "all categories".
/// The client also echoes the category's `type`, which is ignored.
#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    pub id: CategoryId,
}

impl QuizRequest {
    pub fn category_filter(&self) -> Option<i64> {
        self.quiz_category
            .as_ref()
            .map(|c| c.id.as_i64())
            .filter(|&id| id != 0)
    }
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub question: Option<Question>,
    pub success: bool,
}

pub async fn next_question(
    State(state): State<AppState>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, AppError> {
    let Json(request) = payload?;

    let question = state
        .quiz
        .next_question(&request.previous_questions, request.category_filter())
        .await?;

    Ok(Json(QuizResponse {
        question,
        success: true,
    }))
}

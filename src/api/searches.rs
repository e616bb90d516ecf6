use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::questions::{load_page, page_request, PageQuery, QuestionsResponse};
use crate::api::AppState;
use crate::domain::QuestionFilter;
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub search_term: String,
}

pub async fn search_questions(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let page = page_request(query)?;
    let Json(request) = payload?;

    let filter = QuestionFilter::Search(request.search_term);
    let questions = load_page(&state, &filter, page).await?;
    Ok(Json(QuestionsResponse::from_page(questions, None)))
}

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::{AppState, SuccessResponse};
use crate::domain::{CategoryMap, NewQuestion, Page, PageRequest, Question, QuestionFilter};
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

/// Paginated question listing shared by list, search and per-category routes.
#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategoryMap>,
    pub current_category: Option<i64>,
    pub success: bool,
}

impl QuestionsResponse {
    pub fn from_page(page: Page<Question>, current_category: Option<i64>) -> Self {
        QuestionsResponse {
            questions: page.items,
            total_questions: page.total,
            categories: None,
            current_category,
            success: true,
        }
    }

    pub fn with_categories(mut self, categories: CategoryMap) -> Self {
        self.categories = Some(categories);
        self
    }
}

/// Resolve `?page=N`, rejecting missing pages with 404.
pub(crate) fn page_request(
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<PageRequest, AppError> {
    let Query(params) = query?;
    match params.page {
        None => Ok(PageRequest::first()),
        Some(n) => {
            PageRequest::new(n).ok_or_else(|| AppError::NotFound(format!("page {n}")))
        }
    }
}

/// Load one page of questions, treating an empty page past the first as 404.
pub(crate) async fn load_page(
    state: &AppState,
    filter: &QuestionFilter,
    page: PageRequest,
) -> Result<Page<Question>, AppError> {
    let page_data = state.repo.list_questions(filter, page).await?;
    if page_data.is_out_of_range() {
        return Err(AppError::NotFound(format!("page {}", page.page())));
    }
    Ok(page_data)
}

pub async fn list_questions(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let page = page_request(query)?;
    let questions = load_page(&state, &QuestionFilter::All, page).await?;
    let categories = state.repo.category_map().await?;

    Ok(Json(
        QuestionsResponse::from_page(questions, None).with_categories(categories),
    ))
}

pub async fn create_question(
    State(state): State<AppState>,
    payload: Result<Json<NewQuestion>, JsonRejection>,
) -> Result<(StatusCode, Json<SuccessResponse>), AppError> {
    let Json(new_question) = payload?;
    let new_question = new_question.validate()?;

    let created = state.repo.create_question(new_question).await?;
    info!(id = created.id, category = created.category, "Created question");

    Ok((StatusCode::CREATED, Json(SuccessResponse::ok())))
}

pub async fn delete_question(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Path(id) = id?;

    if state.repo.get_question(id).await?.is_none() {
        return Err(AppError::NotFound(format!("question {id}")));
    }
    state.repo.delete_question(id).await?;
    info!(id, "Deleted question");

    Ok(Json(SuccessResponse::ok()))
}

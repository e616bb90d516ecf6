use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::questions::{load_page, page_request, PageQuery, QuestionsResponse};
use crate::api::AppState;
use crate::domain::{CategoryMap, QuestionFilter};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: CategoryMap,
    pub success: bool,
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let categories = state.repo.category_map().await?;
    Ok(Json(CategoriesResponse {
        categories,
        success: true,
    }))
}

pub async fn get_category_questions(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let Path(id) = id?;
    let page = page_request(query)?;

    let category = state
        .repo
        .get_category(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;

    let questions = load_page(&state, &QuestionFilter::Category(category.id), page).await?;
    Ok(Json(QuestionsResponse::from_page(questions, Some(category.id))))
}

pub mod categories;
pub mod health;
pub mod questions;
pub mod quizzes;
pub mod searches;

use crate::db::Repository;
use crate::engine::QuizSelector;
use crate::error::AppError;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub quiz: Arc<QuizSelector>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>) -> Self {
        let quiz = Arc::new(QuizSelector::new(repo.clone()));
        Self { repo, quiz }
    }
}

/// Body of mutations that return nothing but their outcome.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        SuccessResponse { success: true }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/categories", get(categories::list_categories))
        .route(
            "/categories/:id/questions",
            get(categories::get_category_questions),
        )
        .route(
            "/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        .route("/questions/:id", delete(questions::delete_question))
        .route("/question-searches", post(searches::search_questions))
        .route("/quizzes", post(quizzes::next_question))
        .fallback(not_found)
        .layer(middleware::map_response(method_not_allowed_json))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("no route".into())
}

/// Give axum's bare 405 responses the JSON error body, keeping `Allow`.
async fn method_not_allowed_json(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut replaced = AppError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        replaced.headers_mut().insert(header::ALLOW, allow);
    }
    replaced
}

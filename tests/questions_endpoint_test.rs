use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use trivia_api::api::{self, AppState};
use trivia_api::db::init_db;
use trivia_api::{NewQuestion, Question, Repository};

struct TestApp {
    app: axum::Router,
    repo: Arc<Repository>,
    _temp: TempDir,
}

async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path, 5).await.expect("init_db failed");
    let repo = Arc::new(Repository::new(pool));
    let app = api::create_router(AppState::new(repo.clone()));

    TestApp {
        app,
        repo,
        _temp: temp_dir,
    }
}

async fn seed(repo: &Repository, count: usize) -> Vec<Question> {
    let mut created = Vec::with_capacity(count);
    for i in 0..count {
        let category = (i % 6) as i64 + 1;
        let q = repo
            .create_question(NewQuestion::new(format!("Question {i}"), format!("Answer {i}"), category, 2))
            .await
            .expect("seed insert failed");
        created.push(q);
    }
    created
}

async fn request(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn total_questions(app: &axum::Router) -> i64 {
    let (status, json) = request(app, "GET", "/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    json["total_questions"].as_i64().unwrap()
}

#[tokio::test]
async fn test_list_questions_shape() {
    let t = setup_test_app().await;
    seed(&t.repo, 3).await;

    let (status, json) = request(&t.app, "GET", "/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert!(json["current_category"].is_null());
    assert_eq!(json["categories"].as_object().unwrap().len(), 6);
    assert_eq!(json["categories"]["1"], "Art");

    let q = &json["questions"][0];
    assert!(q["id"].is_i64());
    assert_eq!(q["question"], "Question 0");
    assert_eq!(q["answer"], "Answer 0");
    assert_eq!(q["category"], 1);
    assert_eq!(q["difficulty"], 2);
}

#[tokio::test]
async fn test_pagination_with_nineteen_questions() {
    let t = setup_test_app().await;
    seed(&t.repo, 19).await;

    let (status, json) = request(&t.app, "GET", "/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["questions"].as_array().unwrap().len(), 10);
    assert_eq!(json["total_questions"], 19);

    let (status, json) = request(&t.app, "GET", "/questions?page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["questions"].as_array().unwrap().len(), 9);
    assert_eq!(json["total_questions"], 19);

    let (status, json) = request(&t.app, "GET", "/questions?page=3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_page_never_exceeds_ten_items() {
    let t = setup_test_app().await;
    seed(&t.repo, 35).await;

    for page in 1..=4 {
        let (status, json) = request(&t.app, "GET", &format!("/questions?page={page}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["questions"].as_array().unwrap().len() <= 10);
    }
}

#[tokio::test]
async fn test_invalid_page_is_404() {
    let t = setup_test_app().await;
    seed(&t.repo, 1).await;

    for uri in ["/questions?page=0", "/questions?page=-1", "/questions?page=abc"] {
        let (status, json) = request(&t.app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(json["error"], 404);
    }
}

#[tokio::test]
async fn test_empty_store_lists_first_page() {
    let t = setup_test_app().await;

    let (status, json) = request(&t.app, "GET", "/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["questions"], json!([]));
    assert_eq!(json["total_questions"], 0);
}

#[tokio::test]
async fn test_create_question_increments_total() {
    let t = setup_test_app().await;
    let before = total_questions(&t.app).await;

    let payloads = [
        json!({"question": "SomeQuestion", "answer": "SomeAnswer", "category": 1, "difficulty": 1}),
        json!({"question": "Heaviest planet?", "answer": "Jupiter", "category": "5", "difficulty": 3}),
    ];
    for (i, payload) in payloads.into_iter().enumerate() {
        let (status, json) = request(&t.app, "POST", "/questions", Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json, json!({"success": true}));
        assert_eq!(total_questions(&t.app).await, before + i as i64 + 1);
    }
}

#[tokio::test]
async fn test_malformed_payloads_are_422_and_store_unchanged() {
    let t = setup_test_app().await;
    seed(&t.repo, 2).await;
    let before = total_questions(&t.app).await;

    let payloads = [
        json!({"category": 10000}),
        json!({"question": "q", "answer": "a", "category": 1}),
        json!({"question": "q", "answer": "a", "difficulty": 1}),
        json!({"question": "q", "category": 1, "difficulty": 1}),
        json!({"answer": "a", "category": 1, "difficulty": 1}),
        json!({"question": "q", "answer": "a", "category": 1, "difficulty": "easy"}),
        json!({"question": "q", "answer": "a", "category": 1, "difficulty": 1, "extra": true}),
        json!({"question": "  ", "answer": "a", "category": 1, "difficulty": 1}),
        json!([1, 2, 3]),
    ];
    for payload in payloads {
        let (status, json) = request(&t.app, "POST", "/questions", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{payload}");
        assert_eq!(
            json,
            json!({"error": 422, "message": "Unprocessable Entity", "success": false})
        );
    }

    assert_eq!(total_questions(&t.app).await, before);
}

#[tokio::test]
async fn test_create_accepts_any_integer_difficulty_and_keeps_text() {
    let t = setup_test_app().await;

    for difficulty in [7, 0, -3] {
        let payload = json!({
            "question": " Padded question ",
            "answer": "answer",
            "category": 2,
            "difficulty": difficulty
        });
        let (status, json) = request(&t.app, "POST", "/questions", Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED, "difficulty {difficulty}");
        assert_eq!(json, json!({"success": true}));
    }

    let (_, json) = request(&t.app, "GET", "/questions", None).await;
    let stored: Vec<Question> = serde_json::from_value(json["questions"].clone()).unwrap();
    let difficulties: Vec<i64> = stored.iter().map(|q| q.difficulty).collect();
    assert_eq!(difficulties, vec![7, 0, -3]);
    assert!(stored.iter().all(|q| q.question == " Padded question "));
}

#[tokio::test]
async fn test_create_with_unknown_category_is_422() {
    let t = setup_test_app().await;

    let payload = json!({"question": "q", "answer": "a", "category": 10000, "difficulty": 1});
    let (status, json) = request(&t.app, "POST", "/questions", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["success"], false);
    assert_eq!(total_questions(&t.app).await, 0);
}

#[tokio::test]
async fn test_create_without_json_body_is_422() {
    let t = setup_test_app().await;

    let (status, json) = request(&t.app, "POST", "/questions", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], 422);
}

#[tokio::test]
async fn test_delete_question_flow() {
    let t = setup_test_app().await;
    let created = seed(&t.repo, 3).await;
    let target = created[1].id;
    let before = total_questions(&t.app).await;

    let uri = format!("/questions/{target}");
    let (status, json) = request(&t.app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"success": true}));
    assert_eq!(total_questions(&t.app).await, before - 1);

    let (status, json) = request(&t.app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json,
        json!({"error": 404, "message": "Not Found", "success": false})
    );
    assert_eq!(total_questions(&t.app).await, before - 1);
}

#[tokio::test]
async fn test_delete_non_numeric_id_is_404() {
    let t = setup_test_app().await;

    let (status, json) = request(&t.app, "DELETE", "/questions/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], 404);
}

#[tokio::test]
async fn test_get_on_single_question_is_405() {
    let t = setup_test_app().await;
    let created = seed(&t.repo, 1).await;

    let (status, json) = request(&t.app, "GET", &format!("/questions/{}", created[0].id), None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["error"], 405);
}

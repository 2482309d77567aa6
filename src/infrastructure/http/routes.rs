//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                      GET   存活检查
//! - /api/story/create              POST  创建故事
//! - /api/story/get                 POST  获取故事及全部章节
//! - /api/story/set_password        POST  设置或更换密码
//! - /api/story/remove_password     POST  解除密码
//! - /api/story/continue            POST  续写下一章

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/story", story_routes())
}

/// Story 路由
fn story_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_story))
        .route("/get", post(handlers::get_story))
        .route("/set_password", post(handlers::set_password))
        .route("/remove_password", post(handlers::remove_password))
        .route("/continue", post(handlers::continue_story))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::application::{GenerationError, GenerationSettings};
    use crate::infrastructure::adapters::FakeTextGenerator;
    use crate::infrastructure::memory::InMemoryStoryLocks;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteStoryRepository,
    };

    async fn create_test_router(generator: FakeTextGenerator) -> Router {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let state = AppState::new(
            Arc::new(SqliteStoryRepository::new(pool)),
            Arc::new(generator),
            Arc::new(InMemoryStoryLocks::new()),
            GenerationSettings::default(),
        );
        create_routes().with_state(Arc::new(state))
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> Value {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_story(app: &Router, password: Option<&str>) -> String {
        let body = post_json(
            app,
            "/api/story/create",
            json!({ "title": "Harbor Lights", "genre": "mystery", "password": password }),
        )
        .await;
        assert_eq!(body["errno"], 0);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_ping() {
        let app = create_test_router(FakeTextGenerator::new()).await;
        let request = Request::builder().uri("/api/ping").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_then_get_unprotected_story() {
        let app = create_test_router(FakeTextGenerator::new()).await;
        let id = create_story(&app, None).await;

        let body = post_json(&app, "/api/story/get", json!({ "id": id })).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["story"]["title"], "Harbor Lights");
        assert_eq!(body["data"]["story"]["is_protected"], false);
        assert_eq!(body["data"]["chapters"], json!([]));
    }

    #[tokio::test]
    async fn test_protected_story_returns_metadata_only() {
        let app = create_test_router(FakeTextGenerator::new()).await;
        let id = create_story(&app, Some("tide-4821")).await;

        let body = post_json(&app, "/api/story/get", json!({ "id": id })).await;
        assert_eq!(body["errno"], 401);
        assert_eq!(body["data"]["id"], id.as_str());
        assert_eq!(body["data"]["is_protected"], true);
        assert!(body["data"].get("chapters").is_none());
        assert!(!body.to_string().contains("password_hash"));

        let body = post_json(&app, "/api/story/get", json!({ "id": id, "password": "wrong" })).await;
        assert_eq!(body["errno"], 403);
        assert!(body["data"].is_null());

        let body = post_json(
            &app,
            "/api/story/get",
            json!({ "id": id, "password": "tide-4821" }),
        )
        .await;
        assert_eq!(body["errno"], 0);
    }

    #[tokio::test]
    async fn test_continue_appends_chapter() {
        let generator = FakeTextGenerator::with_responses(vec![
            Ok("The fog rolled in over the docks.".to_string()),
            Ok("Fog arrives at the harbor.".to_string()),
        ]);
        let app = create_test_router(generator).await;
        let id = create_story(&app, None).await;

        let body = post_json(
            &app,
            "/api/story/continue",
            json!({ "id": id, "prompt": "Begin at the docks" }),
        )
        .await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["chapter"]["chapter_number"], 1);
        assert_eq!(body["data"]["chapter"]["summary"], "Fog arrives at the harbor.");
        assert_eq!(body["data"]["summary_fallback"], false);

        let body = post_json(&app, "/api/story/get", json!({ "id": id })).await;
        assert_eq!(body["data"]["chapters"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_continue_generation_failure_maps_to_502() {
        let generator = FakeTextGenerator::with_responses(vec![Err(
            GenerationError::QuotaExceeded("rate limited".to_string()),
        )]);
        let app = create_test_router(generator).await;
        let id = create_story(&app, None).await;

        let body = post_json(
            &app,
            "/api/story/continue",
            json!({ "id": id, "prompt": "Begin" }),
        )
        .await;
        assert_eq!(body["errno"], 502);

        let body = post_json(&app, "/api/story/get", json!({ "id": id })).await;
        assert_eq!(body["data"]["chapters"], json!([]));
    }

    #[tokio::test]
    async fn test_password_lifecycle() {
        let app = create_test_router(FakeTextGenerator::new()).await;
        let id = create_story(&app, None).await;

        let body = post_json(
            &app,
            "/api/story/set_password",
            json!({ "id": id, "password": "anchor-77" }),
        )
        .await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["is_protected"], true);

        let body = post_json(
            &app,
            "/api/story/remove_password",
            json!({ "id": id, "password": "nope" }),
        )
        .await;
        assert_eq!(body["errno"], 403);

        let body = post_json(
            &app,
            "/api/story/remove_password",
            json!({ "id": id, "password": "anchor-77" }),
        )
        .await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["is_protected"], false);
    }

    #[tokio::test]
    async fn test_unknown_story_and_invalid_input() {
        let app = create_test_router(FakeTextGenerator::new()).await;

        let body = post_json(
            &app,
            "/api/story/get",
            json!({ "id": "00000000-0000-0000-0000-000000000000" }),
        )
        .await;
        assert_eq!(body["errno"], 404);

        let body = post_json(
            &app,
            "/api/story/create",
            json!({ "title": "   ", "genre": "mystery" }),
        )
        .await;
        assert_eq!(body["errno"], 400);
    }
}

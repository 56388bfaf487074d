//! HTTP surface tests driven through the router with an in-memory comment source

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use parking_lot::Mutex;
use std::sync::Arc;
use tower::ServiceExt;

use shopbot_agent::{AffiliateLinkBuilder, ReplyEngine};
use shopbot_config::{KnowledgeBase, Settings};
use shopbot_core::{CommentSource, CommentThread, Result};
use shopbot_server::{create_router, AppState};

#[derive(Default)]
struct FakeSource {
    threads: Vec<CommentThread>,
    posted: Mutex<Vec<String>>,
}

#[async_trait]
impl CommentSource for FakeSource {
    async fn fetch_threads(&self, _video_id: &str) -> Result<Vec<CommentThread>> {
        Ok(self.threads.clone())
    }

    async fn post_reply(&self, parent_id: &str, _text: &str) -> Result<()> {
        self.posted.lock().push(parent_id.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "fake"
    }
}

fn settings(with_credentials: bool) -> Settings {
    let mut settings = Settings::default();
    settings.affiliate.tag = "shop-21".to_string();
    if with_credentials {
        settings.youtube.client_id = "id".to_string();
        settings.youtube.client_secret = "secret".to_string();
        settings.youtube.refresh_token = "refresh".to_string();
        settings.youtube.video_ids = vec!["vid1".to_string()];
    } else {
        settings.youtube.client_id = String::new();
        settings.youtube.client_secret = String::new();
        settings.youtube.refresh_token = String::new();
        settings.youtube.video_ids = Vec::new();
    }
    settings
}

fn app(settings: Settings, source: Option<Arc<dyn CommentSource>>) -> Router {
    let engine = ReplyEngine::new(
        Arc::new(KnowledgeBase::builtin().unwrap()),
        Arc::new(AffiliateLinkBuilder::from_config(&settings.affiliate).unwrap()),
        settings.replies.clone(),
    );
    create_router(AppState::new(settings, engine, source))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_banner_and_health() {
    let response = app(settings(false), None).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"Shopping reply bot is running.");

    let (status, json) = send(app(settings(false), None), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_check_comments_requires_credentials() {
    let (status, json) = send(app(settings(false), None), get("/check-comments")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "error");
    let message = json["message"].as_str().unwrap();
    assert!(message.starts_with("Missing config:"));
    assert!(message.contains("youtube.refresh_token"));
    assert!(message.contains("youtube.video_ids"));
}

#[tokio::test]
async fn test_check_comments_runs_pass() {
    let source = Arc::new(FakeSource {
        threads: vec![
            CommentThread::new("c1", "earphones 1500 ke under"),
            CommentThread::new("c2", "first!"),
            CommentThread::new("c3", "laptop 50k").answered(),
        ],
        ..Default::default()
    });

    let (status, json) = send(
        app(settings(true), Some(source.clone() as Arc<dyn CommentSource>)),
        get("/check-comments"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["processedComments"], 2);
    assert_eq!(json["skipped"], 2);
    assert_eq!(json["failed"], 0);
    assert_eq!(json["replies"][0]["commentId"], "c1");
    assert_eq!(json["replies"][0]["budget"], 1500);
    assert_eq!(*source.posted.lock(), vec!["c1".to_string()]);
}

#[tokio::test]
async fn test_dry_run_reply() {
    let (status, json) = send(
        app(settings(false), None),
        post_json(
            "/api/reply",
            serde_json::json!({"text": "gaming laptop under 50000 please"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["parsed"]["need"], "gaming laptop");
    assert_eq!(json["parsed"]["budget"], 50000);
    assert_eq!(json["decision"]["kind"], "suggest_top_n");
    assert!(json["reply"].as_str().unwrap().contains("₹50,000"));
}

#[tokio::test]
async fn test_dry_run_reply_missing_tag() {
    let mut settings = settings(false);
    settings.affiliate.tag = String::new();

    let (status, json) = send(
        app(settings, None),
        post_json("/api/reply", serde_json::json!({"text": "phone under 20000"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn test_dry_run_reply_rejects_empty_text() {
    let (status, _) = send(
        app(settings(false), None),
        post_json("/api/reply", serde_json::json!({"text": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let response = app(settings(false), None)
        .oneshot(get("/metrics"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

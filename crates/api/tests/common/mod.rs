#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use storyforge_api::config::ServerConfig;
use storyforge_api::router::build_app_router;
use storyforge_api::state::AppState;
use storyforge_compiler::llm::CompletionRequest;
use storyforge_compiler::{LlmBackend, LlmError, LlmSettings, SceneCompiler};

/// Marker that makes [`StubLlm`] answer with prose instead of JSON.
pub const PARSE_FAIL_MARKER: &str = "STUB_REPLY_PROSE";
/// Marker that makes [`StubLlm`] answer with a loosely shaped JSON object.
pub const LOOSE_JSON_MARKER: &str = "STUB_REPLY_LOOSE_JSON";
/// Marker that makes [`StubLlm`] fail as if the upstream API returned 503.
pub const UPSTREAM_FAIL_MARKER: &str = "STUB_REPLY_UPSTREAM_DOWN";

/// Canned compiler reply for the stub.
pub const STUB_COMPILED: &str = r#"```json
{
  "image_prompt": "stub image prompt",
  "video_prompt": "stub video prompt",
  "audio_stack": {
    "sound_design": "hum",
    "volume_layers": "BACKGROUND: hum at -20dB",
    "spatial": "centered",
    "narrative": "calm",
    "exclude": "music"
  },
  "director_notes": "hold",
  "continuity_notes": "match previous frame",
  "coherence_flags": []
}
```"#;

/// LLM stand-in that records every request and answers from markers in
/// the user prompt.
#[derive(Default)]
pub struct StubLlm {
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl StubLlm {
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmBackend for StubLlm {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());

        if request.user.contains(UPSTREAM_FAIL_MARKER) {
            return Err(LlmError::ApiError {
                status: 503,
                body: "upstream unavailable".to_string(),
            });
        }
        if request.user.contains(PARSE_FAIL_MARKER) {
            return Ok("Here are some thoughts about the shot, in prose.".to_string());
        }
        if request.user.contains(LOOSE_JSON_MARKER) {
            return Ok(
                r#"{"image_prompt": "orb", "coherence_flags": "none", "negative_prompt": "blur"}"#
                    .to_string(),
            );
        }
        if !request.image_urls.is_empty() {
            return Ok(r#"{"name": "Drafted", "description": "from image"}"#.to_string());
        }
        Ok(STUB_COMPILED.to_string())
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        llm: LlmSettings {
            api_url: "http://127.0.0.1:9".to_string(),
            model: "stub".to_string(),
            api_key: None,
            timeout_secs: 5,
        },
    }
}

/// Build the full application router over `pool` with a fresh stub LLM.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_with_llm(pool, Arc::new(StubLlm::default()))
}

/// Build the full application router with a caller-held stub so tests can
/// inspect what was sent to the model.
pub fn build_test_app_with_llm(pool: SqlitePool, llm: Arc<StubLlm>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        compiler: SceneCompiler::new(llm),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::delete(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::post(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn patch_empty(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::patch(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn send_json(app: Router, method: &str, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "PUT", uri, body).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a project and return its id as a string.
pub async fn create_project(pool: &SqlitePool, body: serde_json::Value) -> String {
    let response = post_json(build_test_app(pool.clone()), "/api/projects", body).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

/// Create a child entity under a project and return the created JSON.
pub async fn create_child(
    pool: &SqlitePool,
    project_id: &str,
    collection: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/projects/{project_id}/{collection}"),
        body,
    )
    .await;
    assert_eq!(response.status(), 201, "creating {collection}");
    body_json(response).await
}

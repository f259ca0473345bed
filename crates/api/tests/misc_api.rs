//! HTTP-level tests for the dashboard, vocabularies, secrets and the
//! example seed.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_child, create_project, delete, get, post_empty, put_json};
use serde_json::json;
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_dashboard_on_empty_database(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/api/dashboard/stats").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["project_count"], 0);
    assert_eq!(json["total_shots"], 0);
    assert_eq!(json["total_duration_sec"], 0.0);
    assert_eq!(json["stage_counts"].as_object().unwrap().len(), 7);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_dashboard_totals_across_projects(pool: SqlitePool) {
    let a = create_project(&pool, json!({"name": "A"})).await;
    let b = create_project(&pool, json!({"name": "B"})).await;
    create_child(&pool, &a, "worlds", json!({"name": "W"})).await;
    create_child(&pool, &b, "characters", json!({"name": "C"})).await;
    let scene = create_child(&pool, &b, "scenes", json!({"scene_number": 1, "title": "S"})).await;
    create_child(
        &pool,
        &b,
        "shots",
        json!({"scene_id": scene["id"], "duration_target_sec": 3.5, "production_status": "mixed"}),
    )
    .await;

    let response = get(build_test_app(pool), "/api/dashboard/stats").await;
    let json = body_json(response).await;
    assert_eq!(json["project_count"], 2);
    assert_eq!(json["total_worlds"], 1);
    assert_eq!(json["total_characters"], 1);
    assert_eq!(json["total_shots"], 1);
    assert_eq!(json["stage_counts"]["mixed"], 1);
    assert_eq!(json["total_duration_sec"], 3.5);
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_enums_lists_every_vocabulary(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/api/enums").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["production_stages"][0], "concept");
    assert_eq!(json["production_stages"][6], "final");
    assert_eq!(json["emotional_zones"].as_array().unwrap().len(), 9);
    assert!(json["framings"].as_array().unwrap().contains(&json!("extreme_close")));
    assert!(json["camera_movements"].as_array().unwrap().contains(&json!("dolly_in")));
    assert!(json["transitions"].as_array().unwrap().contains(&json!("match_cut")));
}

// ---------------------------------------------------------------------------
// Secrets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_secrets_are_masked_and_deletable(pool: SqlitePool) {
    let response = put_json(
        build_test_app(pool.clone()),
        "/api/secrets",
        json!({"key": "llm_api_key", "value": "sk-abcdef1234"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["masked_value"], "*********1234");
    assert!(json.get("value").is_none());

    let response = get(build_test_app(pool.clone()), "/api/secrets").await;
    let json = body_json(response).await;
    assert_eq!(json[0]["key"], "llm_api_key");
    assert!(!json.to_string().contains("abcdef"));

    let response = delete(build_test_app(pool.clone()), "/api/secrets/llm_api_key").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete(build_test_app(pool), "/api/secrets/llm_api_key").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_secret_requires_key_and_value(pool: SqlitePool) {
    let response = put_json(
        build_test_app(pool),
        "/api/secrets",
        json!({"key": "", "value": "x"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_seed_is_idempotent(pool: SqlitePool) {
    let response = post_empty(build_test_app(pool.clone()), "/api/seed/mito").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "seeded");
    assert_eq!(json["shots"], 15);
    let project_id = json["project_id"].as_str().unwrap().to_string();

    let response = post_empty(build_test_app(pool.clone()), "/api/seed/mito").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "already_seeded");
    assert_eq!(json["project_id"], project_id.as_str());

    let response = get(build_test_app(pool), &format!("/api/projects/{project_id}/continuity")).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 15);
}

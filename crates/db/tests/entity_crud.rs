//! Integration tests for entity CRUD through the repository layer.
//!
//! - Defaults applied on create
//! - Partial updates leave other fields untouched
//! - Cascades (project -> everything, scene -> shots, world -> scene.world_id)
//! - Unique and foreign key violations

use assert_matches::assert_matches;
use sqlx::SqlitePool;
use storyforge_core::types::DbId;
use storyforge_db::models::character::CreateCharacter;
use storyforge_db::models::compilation::CreateCompilation;
use storyforge_db::models::object::{CreateStoryObject, UpdateStoryObject};
use storyforge_db::models::project::{CreateProject, UpdateProject};
use storyforge_db::models::scene::{CreateScene, UpdateScene};
use storyforge_db::models::shot::{CreateShot, UpdateShot};
use storyforge_db::models::world::CreateWorld;
use storyforge_db::repositories::{
    CharacterRepo, CompilationRepo, ObjectRepo, ProjectRepo, SceneRepo, SecretRepo, ShotRepo,
    WorldRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        ..Default::default()
    }
}

fn new_scene(number: i32, title: &str) -> CreateScene {
    CreateScene {
        scene_number: number,
        title: title.to_string(),
        ..Default::default()
    }
}

fn new_shot(scene_id: DbId) -> CreateShot {
    CreateShot {
        scene_id,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Test: defaults
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_project_defaults(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("Defaults")).await.unwrap();

    assert_eq!(project.name, "Defaults");
    assert_eq!(project.default_time_of_day, "day");
    assert_eq!(project.default_weather, "clear");
    assert_eq!(project.default_lighting, "natural");
    assert_eq!(project.default_aspect_ratio, "16:9");
    assert!(project.target_duration_sec.is_none());
    assert!(project.tags.0.is_empty());
    assert!(project.model_preferences.0.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_scene_and_shot_defaults(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    let scene = SceneRepo::create(&pool, project.id, &new_scene(1, "Opening"))
        .await
        .unwrap();
    assert_eq!(scene.emotional_zone, "contemplative");
    assert_eq!(scene.dramatic_tension, 5);
    assert!(scene.world_id.is_none());

    let shot = ShotRepo::create(&pool, project.id, &new_shot(scene.id))
        .await
        .unwrap();
    assert_eq!(shot.shot_number, 1);
    assert_eq!(shot.production_status, "concept");
    assert_eq!(shot.framing, "medium");
    assert_eq!(shot.camera_movement, "static");
    assert_eq!(shot.transition_in, "cut");
    assert_eq!(shot.transition_out, "cut");
    assert_eq!(shot.duration_target_sec, 5.0);
}

// ---------------------------------------------------------------------------
// Test: partial update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_partial_update_keeps_other_fields(pool: SqlitePool) {
    let project = ProjectRepo::create(
        &pool,
        &CreateProject {
            name: "Before".to_string(),
            brand_primary: Some("Acme".to_string()),
            tags: Some(vec!["short".to_string()]),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let updated = ProjectRepo::update(
        &pool,
        project.id,
        &UpdateProject {
            name: Some("After".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("project exists");

    assert_eq!(updated.name, "After");
    assert_eq!(updated.brand_primary, "Acme");
    assert_eq!(updated.tags.0, vec!["short".to_string()]);
    assert!(updated.updated_at >= project.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_row_returns_none(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    let result = ObjectRepo::update(
        &pool,
        project.id,
        storyforge_core::types::new_id(),
        &UpdateStoryObject::default(),
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_child_lookup_is_scoped_to_project(pool: SqlitePool) {
    let a = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let b = ProjectRepo::create(&pool, &new_project("B")).await.unwrap();
    let object = ObjectRepo::create(
        &pool,
        a.id,
        &CreateStoryObject {
            name: "Lantern".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(ObjectRepo::find_by_id(&pool, a.id, object.id).await.unwrap().is_some());
    assert!(ObjectRepo::find_by_id(&pool, b.id, object.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: cascades
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_project_cascades(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("Cascade")).await.unwrap();
    let world = WorldRepo::create(
        &pool,
        project.id,
        &CreateWorld {
            name: "Forest".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let character = CharacterRepo::create(
        &pool,
        project.id,
        &CreateCharacter {
            name: "Ada".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let scene = SceneRepo::create(&pool, project.id, &new_scene(1, "One"))
        .await
        .unwrap();
    let shot = ShotRepo::create(&pool, project.id, &new_shot(scene.id))
        .await
        .unwrap();
    CompilationRepo::create(
        &pool,
        &CreateCompilation {
            project_id: project.id,
            shot_id: Some(shot.id),
            status: "compiled".to_string(),
            input: serde_json::json!({}),
            output: serde_json::json!({}),
        },
    )
    .await
    .unwrap();

    assert!(ProjectRepo::delete(&pool, project.id).await.unwrap());

    assert!(WorldRepo::find_by_id(&pool, project.id, world.id).await.unwrap().is_none());
    assert!(CharacterRepo::find_by_id(&pool, project.id, character.id)
        .await
        .unwrap()
        .is_none());
    assert!(ShotRepo::find_by_id(&pool, project.id, shot.id).await.unwrap().is_none());
    assert!(CompilationRepo::list_by_project(&pool, project.id, None)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_scene_cascades_to_shots(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    let keep = SceneRepo::create(&pool, project.id, &new_scene(1, "Keep"))
        .await
        .unwrap();
    let dropped = SceneRepo::create(&pool, project.id, &new_scene(2, "Drop"))
        .await
        .unwrap();
    ShotRepo::create(&pool, project.id, &new_shot(keep.id)).await.unwrap();
    ShotRepo::create(&pool, project.id, &new_shot(dropped.id)).await.unwrap();
    ShotRepo::create(&pool, project.id, &new_shot(dropped.id)).await.unwrap();

    assert!(SceneRepo::delete(&pool, project.id, dropped.id).await.unwrap());

    let remaining = ShotRepo::list_by_project(&pool, project.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].scene_id, keep.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_world_clears_scene_reference(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    let world = WorldRepo::create(
        &pool,
        project.id,
        &CreateWorld {
            name: "Desert".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let scene = SceneRepo::create(
        &pool,
        project.id,
        &CreateScene {
            world_id: Some(world.id),
            ..new_scene(1, "Dunes")
        },
    )
    .await
    .unwrap();
    assert_eq!(scene.world_id, Some(world.id));

    WorldRepo::delete(&pool, project.id, world.id).await.unwrap();

    let scene = SceneRepo::find_by_id(&pool, project.id, scene.id)
        .await
        .unwrap()
        .unwrap();
    assert!(scene.world_id.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_shot_keeps_compilation_history(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    let scene = SceneRepo::create(&pool, project.id, &new_scene(1, "S")).await.unwrap();
    let shot = ShotRepo::create(&pool, project.id, &new_shot(scene.id)).await.unwrap();
    CompilationRepo::create(
        &pool,
        &CreateCompilation {
            project_id: project.id,
            shot_id: Some(shot.id),
            status: "compiled".to_string(),
            input: serde_json::json!({"shot_id": shot.id}),
            output: serde_json::json!({"image_prompt": "x"}),
        },
    )
    .await
    .unwrap();

    ShotRepo::delete(&pool, project.id, shot.id).await.unwrap();

    let history = CompilationRepo::list_by_project(&pool, project.id, None)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert!(history[0].shot_id.is_none());
}

// ---------------------------------------------------------------------------
// Test: constraint violations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_scene_number_is_unique_violation(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    SceneRepo::create(&pool, project.id, &new_scene(1, "First")).await.unwrap();

    let err = SceneRepo::create(&pool, project.id, &new_scene(1, "Clash"))
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref e) if e.is_unique_violation());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_shot_number_via_update_is_unique_violation(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    let scene = SceneRepo::create(&pool, project.id, &new_scene(1, "S")).await.unwrap();
    ShotRepo::create(&pool, project.id, &new_shot(scene.id)).await.unwrap();
    let second = ShotRepo::create(&pool, project.id, &new_shot(scene.id)).await.unwrap();

    let err = ShotRepo::update(
        &pool,
        project.id,
        second.id,
        &UpdateShot {
            shot_number: Some(1),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref e) if e.is_unique_violation());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_shot_with_unknown_scene_is_fk_violation(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    let err = ShotRepo::create(&pool, project.id, &new_shot(storyforge_core::types::new_id()))
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref e) if e.is_foreign_key_violation());
}

// ---------------------------------------------------------------------------
// Test: listing and counts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_scenes_list_by_number_with_shot_counts(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    let third = SceneRepo::create(&pool, project.id, &new_scene(3, "C")).await.unwrap();
    let first = SceneRepo::create(&pool, project.id, &new_scene(1, "A")).await.unwrap();
    ShotRepo::create(&pool, project.id, &new_shot(first.id)).await.unwrap();
    ShotRepo::create(&pool, project.id, &new_shot(first.id)).await.unwrap();

    let scenes = SceneRepo::list_with_shot_counts(&pool, project.id).await.unwrap();
    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0].scene.id, first.id);
    assert_eq!(scenes[0].shot_count, 2);
    assert_eq!(scenes[1].scene.id, third.id);
    assert_eq!(scenes[1].shot_count, 0);

    let moved = SceneRepo::update(
        &pool,
        project.id,
        third.id,
        &UpdateScene {
            scene_number: Some(0),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(moved.scene_number, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_project_counts(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    for name in ["Ada", "Bo"] {
        CharacterRepo::create(
            &pool,
            project.id,
            &CreateCharacter {
                name: name.to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }
    SceneRepo::create(&pool, project.id, &new_scene(1, "S")).await.unwrap();

    let counts = ProjectRepo::counts(&pool, project.id).await.unwrap();
    assert_eq!(counts.character_count, 2);
    assert_eq!(counts.scene_count, 1);
    assert_eq!(counts.world_count, 0);
    assert_eq!(counts.object_count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_characters_resolved_in_requested_order(pool: SqlitePool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    let mut ids = Vec::new();
    for name in ["One", "Two", "Three"] {
        let c = CharacterRepo::create(
            &pool,
            project.id,
            &CreateCharacter {
                name: name.to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        ids.push(c.id);
    }

    let wanted = [ids[2], storyforge_core::types::new_id(), ids[0]];
    let found = CharacterRepo::list_by_ids(&pool, project.id, &wanted).await.unwrap();
    let names: Vec<&str> = found.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Three", "One"]);
}

// ---------------------------------------------------------------------------
// Test: secrets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_secret_upsert_replaces_value(pool: SqlitePool) {
    SecretRepo::upsert(&pool, "llm_api_key", "first").await.unwrap();
    SecretRepo::upsert(&pool, "llm_api_key", "second").await.unwrap();

    let all = SecretRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(
        SecretRepo::get_value(&pool, "llm_api_key").await.unwrap().as_deref(),
        Some("second")
    );

    assert!(SecretRepo::delete(&pool, "llm_api_key").await.unwrap());
    assert!(!SecretRepo::delete(&pool, "llm_api_key").await.unwrap());
}

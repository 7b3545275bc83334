#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use repset::commit::CommitService;
use repset::db::{create_memory_pool, DbPool};
use repset::migrations::run_migrations_for_tests;
use repset::models::{
    CreateRoutine, HistoryRecord, Intensity, Routine, RoutineExercise, WorkoutExercise,
    WorkoutSet, WorkoutType,
};
use repset::repositories::{
    HistoryRepository, RoutineRepository, SessionRepository, UserRepository,
};
use repset::snapshot::SnapshotStore;
use repset::state::AppState;
use repset::store::WorkoutStore;

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub snapshot_path: PathBuf,
    _snapshot_dir: Option<tempfile::TempDir>,
}

pub fn create_test_app(pool: DbPool) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create snapshot dir");
    let path = dir.path().join("workout.json");
    let mut app = create_test_app_with_snapshot(pool, path);
    app._snapshot_dir = Some(dir);
    app
}

/// Build an app against an explicit snapshot path, so tests can simulate a
/// process restart by constructing a second app on the same file.
pub fn create_test_app_with_snapshot(pool: DbPool, snapshot_path: PathBuf) -> TestApp {
    let user_repo = UserRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());
    let routine_repo = RoutineRepository::new(pool.clone());
    let history_repo = HistoryRepository::new(pool.clone());

    let workout_store = Arc::new(WorkoutStore::new(SnapshotStore::new(&snapshot_path)));
    let commits = CommitService::new(history_repo.clone(), user_repo.clone());

    let state = AppState {
        user_repo,
        session_repo,
        routine_repo,
        history_repo,
        workout_store,
        commits,
    };

    TestApp {
        router: repset::routes::create_router(state.clone()),
        state,
        snapshot_path,
        _snapshot_dir: None,
    }
}

/// Sign in an identity and return the session cookie for later requests.
pub async fn login(app: &TestApp, user_id: &str, display_name: &str) -> String {
    let body = serde_json::json!({
        "id": user_id,
        "display_name": display_name,
        "email": format!("{}@example.com", user_id),
    });

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap();
    extract_cookie_header(set_cookie)
}

pub fn extract_cookie_header(set_cookie: &str) -> String {
    // Keep just the name=value pair for use in a Cookie header
    set_cookie.split(';').next().unwrap_or("").to_string()
}

pub async fn get(app: &TestApp, uri: &str, cookie: &str) -> Response<Body> {
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn post_json(
    app: &TestApp,
    uri: &str,
    cookie: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::COOKIE, cookie)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn put_json(
    app: &TestApp,
    uri: &str,
    cookie: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(uri)
                .header(header::COOKIE, cookie)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn delete(app: &TestApp, uri: &str, cookie: &str) -> Response<Body> {
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn post_empty(app: &TestApp, uri: &str, cookie: &str) -> Response<Body> {
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Insert a finished workout straight into history. `sets` is a list of
/// (reps, weight, completed) triples forming a single exercise.
pub async fn seed_history(
    app: &TestApp,
    user_id: &str,
    workout_type: WorkoutType,
    started_at: chrono::DateTime<chrono::Utc>,
    sets: &[(i64, f64, bool)],
) -> HistoryRecord {
    let exercises = vec![WorkoutExercise {
        exercise_id: "bench-press".to_string(),
        exercise_name: "Bench Press".to_string(),
        sets: sets
            .iter()
            .map(|&(reps, weight, completed)| WorkoutSet {
                reps,
                weight,
                completed,
            })
            .collect(),
    }];
    let ended_at = started_at + chrono::Duration::minutes(45);

    app.state
        .history_repo
        .create_record(
            user_id,
            "routine-1",
            "Push Day",
            workout_type,
            started_at,
            ended_at,
            45 * 60,
            &exercises,
        )
        .await
        .unwrap()
}

/// A three-exercise push routine created straight through the repository.
pub async fn create_test_routine(app: &TestApp, user_id: &str) -> Routine {
    app.state
        .routine_repo
        .create(
            user_id,
            CreateRoutine {
                name: "Push Day".to_string(),
                workout_type: WorkoutType::Push,
                intensity: Intensity::Medium,
                estimated_duration: 60,
                exercises: vec![
                    RoutineExercise {
                        exercise_id: "bench-press".to_string(),
                        exercise_name: "Bench Press".to_string(),
                        sets: 3,
                        reps: 8,
                        weight: 60.0,
                    },
                    RoutineExercise {
                        exercise_id: "overhead-press".to_string(),
                        exercise_name: "Overhead Press".to_string(),
                        sets: 3,
                        reps: 10,
                        weight: 40.0,
                    },
                    RoutineExercise {
                        exercise_id: "dips".to_string(),
                        exercise_name: "Dips".to_string(),
                        sets: 4,
                        reps: 12,
                        weight: 0.0,
                    },
                ],
            },
        )
        .await
        .unwrap()
}

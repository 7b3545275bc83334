mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use repset::models::WorkoutType;

#[tokio::test]
async fn test_history_lists_newest_first() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);
    let cookie = common::login(&app, "user-1", "Alex").await;

    let older = common::seed_history(
        &app,
        "user-1",
        WorkoutType::Push,
        Utc::now() - Duration::hours(3),
        &[(8, 60.0, true)],
    )
    .await;
    let newer = common::seed_history(
        &app,
        "user-1",
        WorkoutType::Pull,
        Utc::now() - Duration::hours(1),
        &[(10, 40.0, true)],
    )
    .await;

    let records = common::body_json(common::get(&app, "/history", &cookie).await).await;
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], newer.id.as_str());
    assert_eq!(records[1]["id"], older.id.as_str());
}

#[tokio::test]
async fn test_history_filters_by_workout_type() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);
    let cookie = common::login(&app, "user-1", "Alex").await;

    common::seed_history(
        &app,
        "user-1",
        WorkoutType::Push,
        Utc::now() - Duration::hours(2),
        &[(8, 60.0, true)],
    )
    .await;
    let legs = common::seed_history(
        &app,
        "user-1",
        WorkoutType::Legs,
        Utc::now() - Duration::hours(1),
        &[(5, 100.0, true)],
    )
    .await;

    let records =
        common::body_json(common::get(&app, "/history?workout_type=Legs", &cookie).await).await;
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], legs.id.as_str());
}

#[tokio::test]
async fn test_unknown_workout_type_is_rejected() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);
    let cookie = common::login(&app, "user-1", "Alex").await;

    let response = common::get(&app, "/history?workout_type=Cardio", &cookie).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recent_respects_the_limit() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);
    let cookie = common::login(&app, "user-1", "Alex").await;

    for hours_ago in 1..=4 {
        common::seed_history(
            &app,
            "user-1",
            WorkoutType::Push,
            Utc::now() - Duration::hours(hours_ago),
            &[(8, 60.0, true)],
        )
        .await;
    }

    let records =
        common::body_json(common::get(&app, "/history/recent?limit=2", &cookie).await).await;
    assert_eq!(records.as_array().unwrap().len(), 2);

    // Default window is five.
    let records = common::body_json(common::get(&app, "/history/recent", &cookie).await).await;
    assert_eq!(records.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_history_is_scoped_to_its_owner() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);
    common::login(&app, "user-a", "Alex").await;
    let cookie_b = common::login(&app, "user-b", "Blair").await;

    let record = common::seed_history(
        &app,
        "user-a",
        WorkoutType::Push,
        Utc::now() - Duration::hours(1),
        &[(8, 60.0, true)],
    )
    .await;

    let records = common::body_json(common::get(&app, "/history", &cookie_b).await).await;
    assert_eq!(records.as_array().unwrap().len(), 0);

    let response = common::get(&app, &format!("/history/{}", record.id), &cookie_b).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_profile_requires_auth() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = common::get(&app, "/profile", "").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_creates_profile_and_session() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let cookie = common::login(&app, "user-1", "Alex").await;

    let response = common::get(&app, "/profile", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let profile = common::body_json(response).await;
    assert_eq!(profile["id"], "user-1");
    assert_eq!(profile["display_name"], "Alex");
    assert_eq!(profile["current_streak"], 0);
    assert_eq!(profile["longest_streak"], 0);
    assert!(profile["last_workout_date"].is_null());
}

#[tokio::test]
async fn test_login_refreshes_profile_fields() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    common::login(&app, "user-1", "Alex").await;
    let cookie = common::login(&app, "user-1", "Alexandra").await;

    let profile = common::body_json(common::get(&app, "/profile", &cookie).await).await;
    assert_eq!(profile["display_name"], "Alexandra");
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let cookie = common::login(&app, "user-1", "Alex").await;
    let response = common::post_empty(&app, "/auth/logout", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::get(&app, "/profile", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_needs_no_auth() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = common::get(&app, "/health", "").await;
    assert_eq!(response.status(), StatusCode::OK);
}

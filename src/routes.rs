use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, health, history, profile, routines, stats, workout};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::check))
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        // Live workout session
        .route("/workout", get(workout::show))
        .route("/workout/start", post(workout::start))
        .route("/workout/sets/toggle", post(workout::toggle_set))
        .route("/workout/sets/update", post(workout::update_set))
        .route("/workout/finish", post(workout::finish))
        .route("/workout/cancel", post(workout::cancel))
        // Routines
        .route("/routines", get(routines::list).post(routines::create))
        .route(
            "/routines/{id}",
            get(routines::show)
                .put(routines::update)
                .delete(routines::delete),
        )
        // History
        .route("/history", get(history::list))
        .route("/history/recent", get(history::recent))
        .route("/history/{id}", get(history::show))
        // Stats & profile
        .route("/stats/weekly", get(stats::weekly))
        .route("/stats/daily", get(stats::daily))
        .route("/profile", get(profile::show))
        .with_state(state)
}

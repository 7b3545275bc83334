use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repset::commit::CommitService;
use repset::config::Config;
use repset::repositories::{
    HistoryRepository, RoutineRepository, SessionRepository, UserRepository,
};
use repset::snapshot::SnapshotStore;
use repset::state::AppState;
use repset::store::WorkoutStore;
use repset::{db, migrations, routes, timer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repset=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Connecting to database: {}", config.database_url);

    // Create database pool
    let pool = db::create_pool(&config.database_url)?;

    // Run migrations
    migrations::run_migrations(&pool)?;

    // Create repositories
    let user_repo = UserRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());
    let routine_repo = RoutineRepository::new(pool.clone());
    let history_repo = HistoryRepository::new(pool.clone());

    // Clear out stale device sessions from previous runs
    session_repo.cleanup_expired().await?;

    // Live workout state machine, mirrored to the snapshot file
    let workout_store = Arc::new(WorkoutStore::new(SnapshotStore::new(&config.snapshot_path)));
    let commits = CommitService::new(history_repo.clone(), user_repo.clone());

    // Single repeating tick source for the live session
    timer::spawn(workout_store.clone());

    let state = AppState {
        user_repo,
        session_repo,
        routine_repo,
        history_repo,
        workout_store,
        commits,
    };

    let app = routes::create_router(state);

    // Start server
    let addr = config.server_addr();
    tracing::info!("Starting server at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

pub mod bootstrap;
pub mod commit;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod streaks;
pub mod timer;

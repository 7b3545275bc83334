pub mod auth;
pub mod health;
pub mod history;
pub mod profile;
pub mod routines;
pub mod stats;
pub mod workout;

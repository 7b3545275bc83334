use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::streaks::{self, DailyStats, WeeklyStats};

#[derive(Deserialize)]
pub struct WeeklyQuery {
    /// Any date inside the week of interest; defaults to today.
    pub week_of: Option<NaiveDate>,
}

pub async fn weekly(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<WeeklyQuery>,
) -> Result<Json<WeeklyStats>> {
    let day = query.week_of.unwrap_or_else(|| Local::now().date_naive());
    let stats =
        streaks::weekly_stats(&state.history_repo, &auth_user.id, streaks::week_start(day)).await?;
    Ok(Json(stats))
}

#[derive(Deserialize)]
pub struct DailyQuery {
    pub date: Option<NaiveDate>,
}

pub async fn daily(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<DailyQuery>,
) -> Result<Json<DailyStats>> {
    let day = query.date.unwrap_or_else(|| Local::now().date_naive());
    let stats = streaks::daily_stats(&state.history_repo, &auth_user.id, day).await?;
    Ok(Json(stats))
}

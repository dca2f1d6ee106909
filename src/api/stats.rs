use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ApiError, AuthUser};
use crate::entries::EntrySource;
use crate::error::DaylogResult;
use crate::range::{local_today, parse_optional_day, DateRange};
use crate::server::AppState;
use crate::stats::{
    compute_summary, get_streak_info, trend_series, Metric, StatisticsSummary, StreakInfo,
    TrendPoint,
};

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub days: Option<u32>,
}

impl StatsQuery {
    fn range(&self, default_days: u32) -> DaylogResult<DateRange> {
        let today = local_today();
        DateRange::resolve(
            parse_optional_day(self.start.as_deref(), today)?,
            parse_optional_day(self.end.as_deref(), today)?,
            self.days,
            default_days,
            today,
        )
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(flatten)]
    pub summary: StatisticsSummary,
}

#[derive(Debug, Serialize)]
pub struct TrendResponse {
    pub metric: Metric,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub points: Vec<TrendPoint>,
}

/// `GET /api/stats/summary?start&end&days`
pub async fn summary(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let Query(query) = query?;
    let range = query.range(state.default_days)?;
    let entries = state
        .with_db(move |conn| {
            conn.fetch_entries_for_user(&user.id, Some(range.start), Some(range.end))
        })
        .await?;

    Ok(Json(SummaryResponse {
        start_date: range.start,
        end_date: range.end,
        summary: compute_summary(&entries),
    }))
}

/// `GET /api/stats/trends/{metric}?start&end&days`
pub async fn trends(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(metric): Path<String>,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> Result<Json<TrendResponse>, ApiError> {
    let metric: Metric = metric.parse()?;
    let Query(query) = query?;
    let range = query.range(state.default_days)?;
    let entries = state
        .with_db(move |conn| {
            conn.fetch_entries_for_user(&user.id, Some(range.start), Some(range.end))
        })
        .await?;

    Ok(Json(TrendResponse {
        metric,
        start_date: range.start,
        end_date: range.end,
        points: trend_series(&entries, metric, &range),
    }))
}

/// `GET /api/stats/streak`
pub async fn streak(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<StreakInfo>, ApiError> {
    let entries = state
        .with_db(move |conn| conn.fetch_all_entries_for_user(&user.id))
        .await?;
    Ok(Json(get_streak_info(&entries, local_today())))
}

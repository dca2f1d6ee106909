use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::{ApiError, AuthUser};
use crate::entries::store::{self, UpsertResult};
use crate::entries::{DailyEntry, EntryInput, EntrySource};
use crate::feedback::generate_feedback;
use crate::range::{local_today, parse_day, parse_log_day, parse_optional_day, DateRange};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// `GET /api/entries?start&end`
pub async fn list_entries(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<DailyEntry>>, ApiError> {
    let Query(query) = query?;
    let today = local_today();
    let start = parse_optional_day(query.start.as_deref(), today)?;
    let end = parse_optional_day(query.end.as_deref(), today)?;
    if let (Some(start), Some(end)) = (start, end) {
        DateRange::new(start, end)?;
    }

    let entries = state
        .with_db(move |conn| conn.fetch_entries_for_user(&user.id, start, end))
        .await?;
    Ok(Json(entries))
}

/// `GET /api/entries/{date}`
pub async fn get_entry(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(day): Path<String>,
) -> Result<Json<DailyEntry>, ApiError> {
    let date = parse_day(&day, local_today())?;
    state
        .with_db(move |conn| store::get_entry(conn, &user.id, date))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("no entry for {date}")))
}

/// `PUT /api/entries/{date}`. Answers 201 when created, 200 when replaced.
pub async fn put_entry(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(day): Path<String>,
    input: Result<Json<EntryInput>, JsonRejection>,
) -> Result<(StatusCode, Json<DailyEntry>), ApiError> {
    let date = parse_log_day(&day, local_today())?;
    let Json(input) = input?;
    input.validate()?;

    let user_id = user.id.clone();
    let UpsertResult { mut entry, created } = state
        .with_db(move |conn| store::upsert_entry(conn, &user_id, date, &input))
        .await?;

    if let Some(text) = generate_feedback(state.feedback.clone(), entry.clone()).await {
        let entry_id = entry.id.clone();
        let updated_at = entry.updated_at.clone();
        let stored = text.clone();
        let attached = state
            .with_db(move |conn| store::set_feedback(conn, &entry_id, &updated_at, &stored))
            .await?;
        if attached {
            entry.ai_feedback = Some(text);
        }
    }

    tracing::info!(user = %user.username, date = %date, created, "entry saved");
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(entry)))
}

/// `DELETE /api/entries/{date}`
pub async fn delete_entry(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(day): Path<String>,
) -> Result<StatusCode, ApiError> {
    let date = parse_day(&day, local_today())?;
    let user_id = user.id.clone();
    let deleted = state
        .with_db(move |conn| store::delete_entry(conn, &user_id, date))
        .await?;

    if !deleted {
        return Err(ApiError::not_found(format!("no entry for {date}")));
    }
    tracing::info!(user = %user.username, date = %date, "entry deleted");
    Ok(StatusCode::NO_CONTENT)
}

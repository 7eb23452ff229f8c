// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Upcoming birthdays and plans ("dates to remember").

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Event, EventKind};
use crate::services::{compute_upcoming_events, label_for, EventUrgency, UpcomingQuery};
use crate::time_utils::format_time_of_day;
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/upcoming", get(get_upcoming))
}

#[derive(Deserialize)]
struct UpcomingParams {
    /// Reference date (YYYY-MM-DD) in the caller's time zone
    today: Option<String>,
    window_days: Option<i64>,
    limit: Option<i64>,
}

/// One upcoming event, ready for display.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UpcomingEventView {
    #[cfg_attr(feature = "binding-generation", ts(type = "\"birthday\" | \"plan\""))]
    pub kind: EventKind,
    pub contact_id: String,
    pub contact_name: String,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM, timed plans only
    pub time: Option<String>,
    pub plan_id: Option<String>,
    /// "Birthday" or the plan description (with time)
    pub description: String,
    /// "Today", "Tomorrow", a weekday name or "Jun 15"
    pub label: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "\"today\" | \"tomorrow\" | \"later\""))]
    pub urgency: EventUrgency,
}

impl UpcomingEventView {
    fn new(event: Event, today: NaiveDate) -> Self {
        Self {
            kind: event.kind,
            description: event.description(),
            label: label_for(event.date, today).to_string(),
            urgency: EventUrgency::for_date(event.date, today),
            date: event.date.format("%Y-%m-%d").to_string(),
            time: event.time.map(format_time_of_day),
            plan_id: event.plan.map(|p| p.plan_id),
            contact_id: event.contact_id,
            contact_name: event.contact_name,
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UpcomingResponse {
    pub today: String,
    pub events: Vec<UpcomingEventView>,
    /// Birthdays in the window (including any cut by `limit`)
    pub birthday_count: usize,
    /// Plans in the window (including any cut by `limit`)
    pub plan_count: usize,
}

fn parse_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            AppError::BadRequest("Invalid 'today' parameter: must be YYYY-MM-DD".to_string())
        }),
        None => Ok(chrono::Utc::now().date_naive()),
    }
}

/// Upcoming birthdays and plans for the current user.
async fn get_upcoming(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    params: std::result::Result<Query<UpcomingParams>, QueryRejection>,
) -> Result<Json<UpcomingResponse>> {
    let Query(params) = params?;
    let today = parse_today(params.today.as_deref())?;
    let query = UpcomingQuery::new(
        params
            .window_days
            .unwrap_or(i64::from(state.config.upcoming_window_days)),
        params
            .limit
            .unwrap_or(state.config.upcoming_limit.try_into().unwrap_or(i64::MAX)),
    )?;

    let contacts = state.store.list(&user.user_id).await?;
    let upcoming = compute_upcoming_events(&contacts, today, query);

    tracing::debug!(
        user_id = %user.user_id,
        %today,
        contacts = contacts.len(),
        birthdays = upcoming.birthday_count,
        plans = upcoming.plan_count,
        "Fetched upcoming events"
    );

    Ok(Json(UpcomingResponse {
        today: today.format("%Y-%m-%d").to_string(),
        events: upcoming
            .events
            .into_iter()
            .map(|e| UpcomingEventView::new(e, today))
            .collect(),
        birthday_count: upcoming.birthday_count,
        plan_count: upcoming.plan_count,
    }))
}

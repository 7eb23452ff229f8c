// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Upcoming events aggregation.
//!
//! Projects every birthday to its next occurrence and every plan to its
//! date, keeps those inside `[today, today + window_days]`, and returns
//! them in date order together with the pre-truncation totals.
//!
//! The computation is pure: callers pass `today` explicitly.

use crate::models::{Contact, Event, EventKind, Plan, PlanDetail, UpcomingEvents};
use crate::time_utils::{parse_calendar_date, parse_time_of_day};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;
use std::fmt;

pub const DEFAULT_WINDOW_DAYS: u32 = 30;
pub const DEFAULT_LIMIT: usize = 8;

/// Window and list size for an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingQuery {
    pub window_days: u32,
    pub limit: usize,
}

impl Default for UpcomingQuery {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl UpcomingQuery {
    /// Build a query from untrusted signed input. Negative values are rejected.
    pub fn new(window_days: i64, limit: i64) -> Result<Self, UpcomingError> {
        if window_days < 0 {
            return Err(UpcomingError::NegativeWindow(window_days));
        }
        if limit < 0 {
            return Err(UpcomingError::NegativeLimit(limit));
        }
        Ok(Self {
            window_days: u32::try_from(window_days)
                .map_err(|_| UpcomingError::WindowTooLarge(window_days))?,
            limit: usize::try_from(limit).unwrap_or(usize::MAX),
        })
    }
}

/// Invalid aggregation arguments.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UpcomingError {
    #[error("window_days must not be negative (got {0})")]
    NegativeWindow(i64),

    #[error("limit must not be negative (got {0})")]
    NegativeLimit(i64),

    #[error("window_days is too large (got {0})")]
    WindowTooLarge(i64),
}

/// Compute the upcoming birthdays and plans for `contacts`.
///
/// Birthdays and plans whose dates cannot be parsed are skipped and counted
/// in neither total.
pub fn compute_upcoming_events(
    contacts: &[Contact],
    today: NaiveDate,
    query: UpcomingQuery,
) -> UpcomingEvents {
    let window_end = today
        .checked_add_days(Days::new(u64::from(query.window_days)))
        .unwrap_or(NaiveDate::MAX);
    let in_window = |date: NaiveDate| date >= today && date <= window_end;

    let mut events = Vec::new();
    let mut birthday_count = 0;
    let mut plan_count = 0;

    for contact in contacts {
        if let Some(event) = birthday_event(contact, today) {
            if in_window(event.date) {
                birthday_count += 1;
                events.push(event);
            }
        }

        for plan in &contact.plans {
            if let Some(event) = plan_event(contact, plan) {
                if in_window(event.date) {
                    plan_count += 1;
                    events.push(event);
                }
            }
        }
    }

    events.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    events.truncate(query.limit);

    tracing::debug!(
        birthday_count,
        plan_count,
        returned = events.len(),
        window_days = query.window_days,
        "Computed upcoming events"
    );

    UpcomingEvents {
        events,
        birthday_count,
        plan_count,
    }
}

fn birthday_event(contact: &Contact, today: NaiveDate) -> Option<Event> {
    let raw = contact.birthday.as_deref()?;
    let Some(birthday) = parse_calendar_date(raw) else {
        tracing::debug!(contact_id = %contact.id, birthday = raw, "Skipping unparseable birthday");
        return None;
    };

    Some(Event {
        kind: EventKind::Birthday,
        contact_id: contact.id.clone(),
        contact_name: contact.name.clone(),
        date: next_birthday(birthday, today)?,
        time: None,
        plan: None,
    })
}

fn plan_event(contact: &Contact, plan: &Plan) -> Option<Event> {
    let Some(date) = parse_calendar_date(&plan.date) else {
        tracing::debug!(
            contact_id = %contact.id,
            plan_id = %plan.id,
            date = %plan.date,
            "Skipping plan with unparseable date"
        );
        return None;
    };

    let time = match plan.time.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match parse_time_of_day(raw) {
            Some(time) => Some(time),
            None => {
                tracing::debug!(
                    contact_id = %contact.id,
                    plan_id = %plan.id,
                    time = raw,
                    "Skipping plan with unparseable time"
                );
                return None;
            }
        },
    };

    Some(Event {
        kind: EventKind::Plan,
        contact_id: contact.id.clone(),
        contact_name: contact.name.clone(),
        date,
        time,
        plan: Some(PlanDetail {
            plan_id: plan.id.clone(),
            description: plan.description.clone(),
            time,
        }),
    })
}

/// Next occurrence of `birthday` on or after `today`. The birth year is ignored.
///
/// A Feb 29 birthday falls on Mar 1 in non-leap years.
pub fn next_birthday(birthday: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let (month, day) = (birthday.month(), birthday.day());
    let this_year = occurrence_in_year(today.year(), month, day)?;
    if this_year >= today {
        return Some(this_year);
    }
    occurrence_in_year(today.year() + 1, month, day)
}

fn occurrence_in_year(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        if month == 2 && day == 29 {
            NaiveDate::from_ymd_opt(year, 3, 1)
        } else {
            None
        }
    })
}

// ─── Labels ──────────────────────────────────────────────────

/// Relative label for an event date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLabel {
    Today,
    Tomorrow,
    /// Later in the same Sunday-started week
    Weekday(Weekday),
    /// Anything else, shown as "Jun 15"
    MonthDay(NaiveDate),
}

impl fmt::Display for DateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateLabel::Today => f.write_str("Today"),
            DateLabel::Tomorrow => f.write_str("Tomorrow"),
            DateLabel::Weekday(day) => f.write_str(weekday_name(*day)),
            DateLabel::MonthDay(date) => write!(f, "{}", date.format("%b %-d")),
        }
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Label `date` relative to `today`. Weeks start on Sunday.
pub fn label_for(date: NaiveDate, today: NaiveDate) -> DateLabel {
    if date == today {
        DateLabel::Today
    } else if today.succ_opt() == Some(date) {
        DateLabel::Tomorrow
    } else if week_start(date) == week_start(today) {
        DateLabel::Weekday(date.weekday())
    } else {
        DateLabel::MonthDay(date)
    }
}

fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_sunday())))
}

/// How prominently an event should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventUrgency {
    Today,
    Tomorrow,
    Later,
}

impl EventUrgency {
    pub fn for_date(date: NaiveDate, today: NaiveDate) -> Self {
        match label_for(date, today) {
            DateLabel::Today => EventUrgency::Today,
            DateLabel::Tomorrow => EventUrgency::Tomorrow,
            _ => EventUrgency::Later,
        }
    }
}

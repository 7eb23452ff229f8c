// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Upcoming event model (derived from contacts, never stored).

use crate::time_utils::format_time_of_day;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// What kind of date an event represents.
///
/// Variant order is the tie-break for events on the same date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Birthday,
    Plan,
}

/// Details carried by plan events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanDetail {
    pub plan_id: String,
    pub description: String,
    pub time: Option<NaiveTime>,
}

/// The next occurrence of a birthday or a planned get-together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub kind: EventKind,
    pub contact_id: String,
    pub contact_name: String,
    /// Date of the occurrence
    pub date: NaiveDate,
    /// Time of day, for timed plans only
    pub time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanDetail>,
}

impl Event {
    /// Ordering key: date, then untimed before timed, then kind, then
    /// contact and plan identity so equal dates sort deterministically.
    pub(crate) fn sort_key(&self) -> (NaiveDate, Option<NaiveTime>, EventKind, &str, &str, &str) {
        (
            self.date,
            self.time,
            self.kind,
            self.contact_name.as_str(),
            self.contact_id.as_str(),
            self.plan.as_ref().map_or("", |p| p.plan_id.as_str()),
        )
    }

    /// Short human-readable description ("Birthday", "Coffee at 18:30").
    pub fn description(&self) -> String {
        match &self.plan {
            None => "Birthday".to_string(),
            Some(plan) => match plan.time {
                Some(time) => format!("{} at {}", plan.description, format_time_of_day(time)),
                None => plan.description.clone(),
            },
        }
    }
}

/// Result of the upcoming events aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpcomingEvents {
    /// Events in ascending date order, truncated to the requested limit
    pub events: Vec<Event>,
    /// Birthdays inside the window, before truncation
    pub birthday_count: usize,
    /// Plans inside the window, before truncation
    pub plan_count: usize,
}

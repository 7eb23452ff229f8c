// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GET /api/upcoming tests against a seeded in-memory store.

use axum::http::StatusCode;
use people_keeper::db::MemoryContactStore;
use people_keeper::models::{Category, Contact, Plan};
use serde_json::Value;
use std::collections::BTreeMap;
use tower::ServiceExt;

mod common;

fn seed(
    store: &MemoryContactStore,
    owner: &str,
    id: &str,
    name: &str,
    birthday: Option<&str>,
    plans: Vec<Plan>,
) {
    store.insert(Contact {
        id: id.to_string(),
        owner_id: owner.to_string(),
        name: name.to_string(),
        category: Category::Friends,
        birthday: birthday.map(str::to_string),
        location: None,
        how_we_met: None,
        custom_fields: BTreeMap::new(),
        image_url: None,
        image_position: None,
        plans,
        created_at: "2024-01-01T00:00:00.000Z".to_string(),
        updated_at: "2024-01-01T00:00:00.000Z".to_string(),
    });
}

fn plan(id: &str, description: &str, date: &str, time: Option<&str>) -> Plan {
    Plan {
        id: id.to_string(),
        description: description.to_string(),
        date: date.to_string(),
        time: time.map(str::to_string),
    }
}

async fn get_upcoming(
    uri: &str,
    owner: &str,
    store_setup: impl FnOnce(&MemoryContactStore),
) -> (StatusCode, Value) {
    let (app, state, store) = common::create_test_app();
    store_setup(&store);
    let token = common::create_test_jwt(owner, &state.config.jwt_signing_key);

    let response = app
        .oneshot(common::authed_request("GET", uri, &token, None))
        .await
        .unwrap();
    let status = response.status();
    (status, common::json_body(response).await)
}

#[tokio::test]
async fn test_upcoming_events_with_labels() {
    // 2024-06-10 is a Monday.
    let (status, body) = get_upcoming("/api/upcoming?today=2024-06-10", "user-1", |store| {
        seed(store, "user-1", "ana", "Ana", Some("1990-06-15"), vec![]);
        seed(
            store,
            "user-1",
            "ben",
            "Ben",
            Some("1985-06-10"),
            vec![
                plan("p1", "Coffee", "2024-06-11", Some("18:30")),
                plan("p2", "Concert", "2024-07-15", None),
                plan("p3", "Hike", "2024-06-20", None),
            ],
        );
    })
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["today"], "2024-06-10");
    assert_eq!(body["birthday_count"], 2);
    assert_eq!(body["plan_count"], 2);

    let events = body["events"].as_array().unwrap();
    let summary: Vec<(&str, &str, &str, &str)> = events
        .iter()
        .map(|e| {
            (
                e["contact_name"].as_str().unwrap(),
                e["description"].as_str().unwrap(),
                e["label"].as_str().unwrap(),
                e["urgency"].as_str().unwrap(),
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            ("Ben", "Birthday", "Today", "today"),
            ("Ben", "Coffee at 18:30", "Tomorrow", "tomorrow"),
            ("Ana", "Birthday", "Saturday", "later"),
            ("Ben", "Hike", "Jun 20", "later"),
        ]
    );
    assert_eq!(events[1]["kind"], "plan");
    assert_eq!(events[1]["plan_id"], "p1");
    assert_eq!(events[1]["time"], "18:30");
    assert!(events[0]["plan_id"].is_null());
}

#[tokio::test]
async fn test_limit_truncates_but_counts_do_not() {
    let (status, body) = get_upcoming("/api/upcoming?today=2024-06-10&limit=1", "user-1", |store| {
        seed(store, "user-1", "ana", "Ana", Some("1990-06-15"), vec![]);
        seed(
            store,
            "user-1",
            "ben",
            "Ben",
            None,
            vec![plan("p1", "Lunch", "2024-06-12", None)],
        );
    })
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"].as_array().unwrap().len(), 1);
    assert_eq!(body["events"][0]["contact_name"], "Ben");
    assert_eq!(body["birthday_count"], 1);
    assert_eq!(body["plan_count"], 1);
}

#[tokio::test]
async fn test_window_days_parameter() {
    let setup = |store: &MemoryContactStore| {
        seed(
            store,
            "user-1",
            "ben",
            "Ben",
            None,
            vec![plan("p1", "Concert", "2024-07-15", None)],
        );
    };

    let (_, body) = get_upcoming("/api/upcoming?today=2024-06-10", "user-1", setup).await;
    assert!(body["events"].as_array().unwrap().is_empty());

    let (_, body) =
        get_upcoming("/api/upcoming?today=2024-06-10&window_days=35", "user-1", setup).await;
    assert_eq!(body["events"].as_array().unwrap().len(), 1);
    assert_eq!(body["events"][0]["date"], "2024-07-15");
}

#[tokio::test]
async fn test_only_own_contacts_are_aggregated() {
    let (status, body) = get_upcoming("/api/upcoming?today=2024-06-10", "user-2", |store| {
        seed(store, "user-1", "ana", "Ana", Some("1990-06-15"), vec![]);
    })
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["events"].as_array().unwrap().is_empty());
    assert_eq!(body["birthday_count"], 0);
    assert_eq!(body["plan_count"], 0);
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API authentication and CORS tests.
//!
//! These tests verify that:
//! 1. Protected routes reject requests without valid tokens
//! 2. Protected routes accept bearer and cookie tokens
//! 3. CORS preflight requests return correct headers

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_protected_route_without_token() {
    let (app, _, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/people")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let (app, _, _) = common::create_test_app();

    let response = app
        .oneshot(common::authed_request(
            "GET",
            "/api/upcoming",
            "invalid.token.here",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_key_rejected() {
    let (app, _, _) = common::create_test_app();
    let token = common::create_test_jwt("user-1", b"some_other_key_that_is_32_bytes!");

    let response = app
        .oneshot(common::authed_request("GET", "/api/people", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_valid_token() {
    let (app, state, _) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(common::authed_request("GET", "/api/people", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_session_cookie_accepted() {
    let (app, state, _) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/upcoming")
                .header(header::COOKIE, format!("people_token={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_store_failure_is_not_auth_failure() {
    let (app, state) = common::create_offline_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(common::authed_request("GET", "/api/people", &token, None))
        .await
        .unwrap();

    // Auth passes; the offline store fails.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = common::json_body(response).await;
    assert_eq!(body["error"], "database_error");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/people")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_public_route_no_auth_required() {
    let (app, _, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");
}

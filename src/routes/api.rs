// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contact ("people") routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Category, Contact, ContactUpdate, ImagePosition, NewContact, NewPlan, Plan};
use crate::services::{category_counts, filter_contacts, CategoryCounts, ContactFilter};
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const MAX_SEARCH_LEN: usize = 100;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/people", get(list_people).post(create_person))
        .route(
            "/api/people/{id}",
            get(get_person).patch(update_person).delete(delete_person),
        )
        .route("/api/people/{id}/plans", axum::routing::post(add_plan))
        .route("/api/people/{id}/plans/{plan_id}", delete(remove_plan))
        .route(
            "/api/people/{id}/picture",
            put(set_picture).delete(clear_picture),
        )
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Person {} not found", id))
}

/// Load a contact owned by `user` or fail with 404.
async fn load_contact(state: &AppState, user: &AuthUser, id: &str) -> Result<Contact> {
    state
        .store
        .get(&user.user_id, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// Apply an update to a contact owned by `user` or fail with 404.
async fn apply_update(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    update: ContactUpdate,
) -> Result<Contact> {
    state
        .store
        .update(&user.user_id, id, update)
        .await?
        .ok_or_else(|| not_found(id))
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct PeopleQuery {
    /// Filter by category name (case-insensitive)
    category: Option<String>,
    /// Free-text search
    q: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PeopleResponse {
    pub people: Vec<Contact>,
    /// Counts over all of the user's contacts, ignoring the filter
    pub counts: CategoryCounts,
}

/// List the user's contacts, newest first, optionally filtered.
async fn list_people(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    params: std::result::Result<Query<PeopleQuery>, QueryRejection>,
) -> Result<Json<PeopleResponse>> {
    let Query(params) = params?;
    if params
        .q
        .as_deref()
        .is_some_and(|q| q.chars().count() > MAX_SEARCH_LEN)
    {
        return Err(AppError::BadRequest(format!(
            "Search must be at most {} characters",
            MAX_SEARCH_LEN
        )));
    }

    let category = params
        .category
        .as_deref()
        .filter(|c| !c.trim().is_empty() && !c.trim().eq_ignore_ascii_case("all"))
        .map(str::parse::<Category>)
        .transpose()?;

    tracing::debug!(
        user_id = %user.user_id,
        category = ?category,
        search = ?params.q,
        "Listing people"
    );

    let contacts = state.store.list(&user.user_id).await?;
    let counts = category_counts(&contacts);
    let filter = ContactFilter {
        category,
        search: params.q,
    };
    let people = filter_contacts(&contacts, &filter)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(PeopleResponse { people, counts }))
}

// ─── Single Contact ──────────────────────────────────────────

async fn create_person(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(new): Json<NewContact>,
) -> Result<(StatusCode, Json<Contact>)> {
    new.validate()?;

    let contact = state.store.create(&user.user_id, new).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn get_person(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Contact>> {
    Ok(Json(load_contact(&state, &user, &id).await?))
}

async fn update_person(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(update): Json<ContactUpdate>,
) -> Result<Json<Contact>> {
    Ok(Json(apply_update(&state, &user, &id, update).await?))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteResponse {
    pub success: bool,
}

async fn delete_person(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if !state.store.delete(&user.user_id, &id).await? {
        return Err(not_found(&id));
    }
    Ok(Json(DeleteResponse { success: true }))
}

// ─── Plans ───────────────────────────────────────────────────

async fn add_plan(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(new): Json<NewPlan>,
) -> Result<(StatusCode, Json<Contact>)> {
    let contact = load_contact(&state, &user, &id).await?;
    let plan = Plan::from_new(new)?;

    let mut plans = contact.plans;
    plans.push(plan);
    let update = ContactUpdate {
        plans: Some(plans),
        ..Default::default()
    };

    let contact = apply_update(&state, &user, &id, update).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn remove_plan(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((id, plan_id)): Path<(String, String)>,
) -> Result<Json<Contact>> {
    let contact = load_contact(&state, &user, &id).await?;

    let before = contact.plans.len();
    let plans: Vec<Plan> = contact
        .plans
        .into_iter()
        .filter(|p| p.id != plan_id)
        .collect();
    if plans.len() == before {
        return Err(AppError::NotFound(format!("Plan {} not found", plan_id)));
    }

    let update = ContactUpdate {
        plans: Some(plans),
        ..Default::default()
    };
    Ok(Json(apply_update(&state, &user, &id, update).await?))
}

// ─── Profile Picture ─────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct PictureRequest {
    /// Image reference returned by external storage
    #[validate(url)]
    image_url: String,
    /// Placement inside the frame; centered if omitted
    #[serde(default)]
    position: Option<ImagePosition>,
}

async fn set_picture(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<PictureRequest>,
) -> Result<Json<Contact>> {
    req.validate()?;

    let update = ContactUpdate {
        image_url: Some(Some(req.image_url)),
        image_position: Some(Some(req.position.unwrap_or_default())),
        ..Default::default()
    };
    Ok(Json(apply_update(&state, &user, &id, update).await?))
}

async fn clear_picture(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Contact>> {
    let update = ContactUpdate {
        image_url: Some(None),
        image_position: Some(None),
        ..Default::default()
    };
    Ok(Json(apply_update(&state, &user, &id, update).await?))
}

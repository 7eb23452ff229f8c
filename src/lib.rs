// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! People-Keeper: remember the people in your life
//!
//! This crate provides the backend API for keeping a personal contact list
//! (birthdays, plans, custom details, profile pictures) and for computing
//! the upcoming birthdays and plans across it.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::ContactStore;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ContactStore>,
}

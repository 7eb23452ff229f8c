// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! People-Keeper API Server
//!
//! Stores a user's contacts and serves the upcoming birthdays and plans
//! across them.

use people_keeper::{
    config::{Config, StoreBackend},
    db::{ContactStore, FirestoreDb, MemoryContactStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        store = ?config.store_backend,
        "Starting People-Keeper API"
    );

    let store: Arc<dyn ContactStore> = match config.store_backend {
        StoreBackend::Firestore => Arc::new(
            FirestoreDb::new(&config.gcp_project_id)
                .await
                .expect("Failed to connect to Firestore"),
        ),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory contact store; data is lost on restart");
            Arc::new(MemoryContactStore::new())
        }
    };

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
    });

    // Build router
    let app = people_keeper::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("people_keeper=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}

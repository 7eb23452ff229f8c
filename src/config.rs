// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Cloud Run injects secrets (the JWT signing key) as environment variables,
//! so everything is read once at startup.

use crate::services::upcoming::{DEFAULT_LIMIT, DEFAULT_WINDOW_DAYS};
use std::env;
use std::str::FromStr;

/// Which contact store implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    /// Process-local store, lost on restart (local development)
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StoreBackend::Firestore),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Invalid {
                name: "CONTACT_STORE",
                value: other.to_string(),
            }),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Contact store implementation
    pub store_backend: StoreBackend,
    /// Default look-ahead for upcoming events (days)
    pub upcoming_window_days: u32,
    /// Default number of upcoming events returned
    pub upcoming_limit: usize,
    /// JWT verification key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            store_backend: env::var("CONTACT_STORE")
                .map(|v| v.parse())
                .unwrap_or(Ok(StoreBackend::Firestore))?,
            upcoming_window_days: parse_or("UPCOMING_WINDOW_DAYS", DEFAULT_WINDOW_DAYS)?,
            upcoming_limit: parse_or("UPCOMING_LIMIT", DEFAULT_LIMIT)?,
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }

    /// Config for tests: in-memory store and a fixed signing key.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            store_backend: StoreBackend::Memory,
            upcoming_window_days: DEFAULT_WINDOW_DAYS,
            upcoming_limit: DEFAULT_LIMIT,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }
}

/// Parse an optional numeric variable, rejecting values that are set but invalid.
fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value,
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

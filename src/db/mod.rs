// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contact storage.
//!
//! Handlers depend on the [`ContactStore`] trait; `main` picks the
//! implementation (Firestore in production, in-memory for development
//! and tests).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryContactStore;

use crate::error::AppError;
use crate::models::{Contact, ContactUpdate, NewContact};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    /// Contacts, keyed by contact id, with an `owner_id` field
    pub const PEOPLE: &str = "people";
}

/// Owner-scoped contact persistence.
///
/// Every operation takes the authenticated owner's id. A contact belonging
/// to someone else behaves exactly like a missing one.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// All contacts of `owner`, newest first.
    async fn list(&self, owner: &str) -> Result<Vec<Contact>, AppError>;

    async fn get(&self, owner: &str, id: &str) -> Result<Option<Contact>, AppError>;

    async fn create(&self, owner: &str, new: NewContact) -> Result<Contact, AppError>;

    /// Apply a partial update. Returns `None` if the contact does not exist.
    async fn update(
        &self,
        owner: &str,
        id: &str,
        update: ContactUpdate,
    ) -> Result<Option<Contact>, AppError>;

    /// Returns `false` if there was nothing to delete.
    async fn delete(&self, owner: &str, id: &str) -> Result<bool, AppError>;
}

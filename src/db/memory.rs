// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory contact store.

use crate::db::ContactStore;
use crate::error::AppError;
use crate::models::{Contact, ContactUpdate, NewContact};
use crate::time_utils::now_rfc3339;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Contact store backed by a concurrent map of owner id to contacts.
///
/// Each owner's list is kept newest first. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryContactStore {
    contacts: Arc<DashMap<String, Vec<Contact>>>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully built contact, e.g. test fixtures with fixed ids.
    pub fn insert(&self, contact: Contact) {
        self.contacts
            .entry(contact.owner_id.clone())
            .or_default()
            .insert(0, contact);
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn list(&self, owner: &str) -> Result<Vec<Contact>, AppError> {
        Ok(self
            .contacts
            .get(owner)
            .map(|list| list.value().clone())
            .unwrap_or_default())
    }

    async fn get(&self, owner: &str, id: &str) -> Result<Option<Contact>, AppError> {
        Ok(self
            .contacts
            .get(owner)
            .and_then(|list| list.iter().find(|c| c.id == id).cloned()))
    }

    async fn create(&self, owner: &str, new: NewContact) -> Result<Contact, AppError> {
        let contact = Contact::create(owner, new, &now_rfc3339());
        self.insert(contact.clone());

        tracing::info!(owner, contact_id = %contact.id, "Contact created");
        Ok(contact)
    }

    async fn update(
        &self,
        owner: &str,
        id: &str,
        update: ContactUpdate,
    ) -> Result<Option<Contact>, AppError> {
        let Some(mut list) = self.contacts.get_mut(owner) else {
            return Ok(None);
        };
        let Some(contact) = list.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        update.apply(contact, &now_rfc3339())?;

        tracing::info!(owner, contact_id = id, "Contact updated");
        Ok(Some(contact.clone()))
    }

    async fn delete(&self, owner: &str, id: &str) -> Result<bool, AppError> {
        let Some(mut list) = self.contacts.get_mut(owner) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|c| c.id != id);
        let deleted = list.len() != before;

        if deleted {
            tracing::info!(owner, contact_id = id, "Contact deleted");
        }
        Ok(deleted)
    }
}

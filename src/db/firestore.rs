// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore-backed contact store.
//!
//! Contacts live in the `people` collection, one document per contact,
//! with the owner's id stored on the document. Every read checks the owner
//! so one user's contact ids are useless to another.

use crate::db::{collections, ContactStore};
use crate::error::AppError;
use crate::models::{Contact, ContactUpdate, NewContact};
use crate::time_utils::now_rfc3339;
use async_trait::async_trait;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator needs an unauthenticated connection.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create an offline client; every operation returns a database error.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Fetch a contact document regardless of owner.
    async fn get_document(&self, id: &str) -> Result<Option<Contact>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PEOPLE)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a contact document.
    async fn put_document(&self, contact: &Contact) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PEOPLE)
            .document_id(&contact.id)
            .object(contact)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ContactStore for FirestoreDb {
    async fn list(&self, owner: &str) -> Result<Vec<Contact>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::PEOPLE)
            .filter(|q| q.for_all([q.field("owner_id").eq(owner)]))
            .order_by([("created_at", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn get(&self, owner: &str, id: &str) -> Result<Option<Contact>, AppError> {
        Ok(self
            .get_document(id)
            .await?
            .filter(|contact| contact.owner_id == owner))
    }

    async fn create(&self, owner: &str, new: NewContact) -> Result<Contact, AppError> {
        let contact = Contact::create(owner, new, &now_rfc3339());
        self.put_document(&contact).await?;

        tracing::info!(owner, contact_id = %contact.id, "Contact created");
        Ok(contact)
    }

    /// Fetch-modify-write; the last writer wins.
    async fn update(
        &self,
        owner: &str,
        id: &str,
        update: ContactUpdate,
    ) -> Result<Option<Contact>, AppError> {
        let Some(mut contact) = self.get(owner, id).await? else {
            return Ok(None);
        };

        update.apply(&mut contact, &now_rfc3339())?;
        self.put_document(&contact).await?;

        tracing::info!(owner, contact_id = id, "Contact updated");
        Ok(Some(contact))
    }

    async fn delete(&self, owner: &str, id: &str) -> Result<bool, AppError> {
        if self.get(owner, id).await?.is_none() {
            return Ok(false);
        }

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::PEOPLE)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(owner, contact_id = id, "Contact deleted");
        Ok(true)
    }
}

//! The school directory service.
//!
//! Sits between the HTTP handlers and the store:
//! 1.  Validates submissions and normalizes their image before anything is written.
//! 2.  Inserts accepted schools through the injected [`SchoolStore`].
//! 3.  Reads schools back and reshapes them into listings with a safe image value.

use crate::domain::listing::to_listings;
use crate::domain::{validate_submission, SchoolListing, SchoolRecord, SchoolSubmission, ValidationError};
use crate::storage::{SchoolStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

#[derive(Clone)]
pub struct SchoolService {
    store: Arc<dyn SchoolStore>,
}

impl SchoolService {
    pub fn new(store: Arc<dyn SchoolStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn SchoolStore> {
        &self.store
    }

    /// Validates and stores a submission. Nothing is written unless every rule passes.
    pub async fn add_school(&self, submission: &SchoolSubmission) -> Result<SchoolRecord, ServiceError> {
        let school = validate_submission(submission).map_err(|e| {
            warn!(reason = %e, "rejected school submission");
            e
        })?;

        let record = self.store.insert_school(school).await?;
        info!(id = record.id, name = %record.name, "school added");
        Ok(record)
    }

    /// All schools, newest first, in their listing shape.
    pub async fn list_schools(&self) -> Result<Vec<SchoolListing>, ServiceError> {
        let rows = self.store.list_schools().await?;
        Ok(to_listings(rows))
    }

    pub async fn ping(&self) -> Result<(), ServiceError> {
        Ok(self.store.ping().await?)
    }
}

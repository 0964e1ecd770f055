//! Persistence gateway for the `schools` table.

pub mod memory;
pub mod mysql;

pub use memory::MemorySchoolStore;
pub use mysql::MySqlSchoolStore;

use crate::domain::{NewSchool, SchoolRecord, StoredSchool};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached (connect failure, pool closed, I/O).
    /// Transient: the request fails, the process keeps serving.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// The store refused the row.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

impl StoreError {
    /// Classifies a driver error raised while writing a row.
    pub fn from_write(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => StoreError::ConstraintViolation(db.message().to_string()),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Single-statement access to stored schools.
///
/// Implementations must be shareable across concurrent requests; any
/// connection limits are their own business.
#[async_trait]
pub trait SchoolStore: Send + Sync {
    /// All rows, most recent (highest id) first.
    async fn list_schools(&self) -> Result<Vec<StoredSchool>, StoreError>;

    /// Inserts a validated school and returns it with the id the store assigned.
    async fn insert_school(&self, school: NewSchool) -> Result<SchoolRecord, StoreError>;

    /// Cheap reachability probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

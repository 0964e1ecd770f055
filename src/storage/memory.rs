//! In-process school store. Used for database-less runs (`STORE_BACKEND=memory`)
//! and by the HTTP tests.

use crate::domain::{NewSchool, SchoolRecord, StoredSchool};
use crate::storage::{SchoolStore, StoreError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

struct Table {
    rows: Vec<StoredSchool>,
    next_id: i64,
}

pub struct MemorySchoolStore {
    table: RwLock<Table>,
    available: AtomicBool,
}

impl MemorySchoolStore {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// Starts from existing rows, e.g. legacy data with odd `image` values.
    /// New ids continue after the highest seeded id.
    pub fn with_rows(rows: Vec<StoredSchool>) -> Self {
        let next_id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            table: RwLock::new(Table { rows, next_id }),
            available: AtomicBool::new(true),
        }
    }

    /// Simulates losing (or regaining) the connection to the store.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store is offline".to_string()))
        }
    }
}

impl Default for MemorySchoolStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchoolStore for MemorySchoolStore {
    async fn list_schools(&self) -> Result<Vec<StoredSchool>, StoreError> {
        self.check_available()?;
        let table = self.table.read().await;
        let mut rows = table.rows.clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn insert_school(&self, school: NewSchool) -> Result<SchoolRecord, StoreError> {
        self.check_available()?;
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;
        let record = school.with_id(id);
        table.rows.push(StoredSchool::from(record.clone()));
        Ok(record)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school(name: &str) -> NewSchool {
        NewSchool {
            name: name.to_string(),
            address: "9 Elm St".into(),
            city: "Boston".into(),
            state: "MA".into(),
            contact: "6175550199".into(),
            email: "hello@elm.edu".into(),
            image: format!("data:image/gif;base64,{}", "R0lG".repeat(20)),
        }
    }

    #[tokio::test]
    async fn assigns_increasing_ids_and_lists_newest_first() {
        let store = MemorySchoolStore::new();
        let a = store.insert_school(school("A")).await.unwrap();
        let b = store.insert_school(school("B")).await.unwrap();
        assert!(b.id > a.id);

        let rows = store.list_schools().await.unwrap();
        assert_eq!(
            rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            vec!["B", "A"]
        );
    }

    #[tokio::test]
    async fn seeded_rows_keep_ids_unique() {
        let seeded = StoredSchool::from(school("Old").with_id(41));
        let store = MemorySchoolStore::with_rows(vec![seeded]);
        let fresh = store.insert_school(school("New")).await.unwrap();
        assert_eq!(fresh.id, 42);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn offline_store_reports_unavailable() {
        let store = MemorySchoolStore::new();
        store.set_available(false);
        assert!(matches!(
            store.insert_school(school("X")).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));

        store.set_available(true);
        assert!(store.list_schools().await.unwrap().is_empty());
        assert!(store.is_empty().await);
    }
}

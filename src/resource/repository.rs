use super::Resource;
use async_trait::async_trait;
use std::sync::RwLock;
use uuid::Uuid;

/// Persistence seam for a resource.
///
/// The store is the sole owner of record lifetime: ids are assigned on
/// insert and never change, and a removed id reports absent from then on.
#[async_trait]
pub trait Repository<R: Resource>: Send + Sync {
    /// Every record in store order.
    async fn find_all(&self) -> Vec<R>;

    async fn find_by_id(&self, id: &str) -> Option<R>;

    /// Assigns a fresh id, persists, and returns the stored record.
    async fn insert(&self, record: R) -> R;

    /// Overwrites the stored record carrying the same id.
    async fn save(&self, record: R) -> R;

    /// Returns whether a record was actually removed.
    async fn remove(&self, id: &str) -> bool;
}

/// In-memory store, listing records in insertion order.
pub struct InMemoryRepository<R> {
    rows: RwLock<Vec<R>>,
}

impl<R> InMemoryRepository<R> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<R> Default for InMemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Resource> Repository<R> for InMemoryRepository<R> {
    async fn find_all(&self) -> Vec<R> {
        self.rows.read().unwrap().clone()
    }

    async fn find_by_id(&self, id: &str) -> Option<R> {
        self.rows
            .read()
            .unwrap()
            .iter()
            .find(|record| record.id() == id)
            .cloned()
    }

    async fn insert(&self, mut record: R) -> R {
        record.set_id(Uuid::new_v4().to_string());
        self.rows.write().unwrap().push(record.clone());
        record
    }

    async fn save(&self, record: R) -> R {
        let mut rows = self.rows.write().unwrap();
        if let Some(row) = rows.iter_mut().find(|row| row.id() == record.id()) {
            *row = record.clone();
        }
        record
    }

    async fn remove(&self, id: &str) -> bool {
        let mut rows = self.rows.write().unwrap();
        let before = rows.len();
        rows.retain(|record| record.id() != id);
        rows.len() != before
    }
}

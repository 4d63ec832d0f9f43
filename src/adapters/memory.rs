use crate::domain::model::Entity;
use crate::domain::ports::{FileStorage, Repository};
use crate::utils::error::{StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};
use std::time::Duration;

/// Process-local store keyed by entity id.
#[derive(Debug)]
pub struct InMemoryRepository<E: Entity> {
    records: RwLock<HashMap<String, E>>,
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::backend("in-memory store lock poisoned")
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn save(&self, entity: &E) -> StoreResult<()> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.insert(entity.id().to_string(), entity.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<E>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(id).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<E>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.values().cloned().collect())
    }

    async fn update(&self, entity: &E) -> StoreResult<()> {
        self.save(entity).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.remove(id);
        Ok(())
    }
}

/// Presigner stub that hands out `memory://` URLs and remembers every key.
#[derive(Debug, Default)]
pub struct InMemoryFileStorage {
    issued: Mutex<Vec<(String, Duration)>>,
}

impl InMemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys presigned so far with their requested lifetimes, oldest first.
    pub fn issued(&self) -> Vec<(String, Duration)> {
        self.issued.lock().map(|i| i.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn presign_upload(&self, key: &str, expires_in: Duration) -> StoreResult<String> {
        self.issued
            .lock()
            .map_err(|_| poisoned())?
            .push((key.to_string(), expires_in));
        Ok(format!("memory://{}?expires_in={}", key, expires_in.as_secs()))
    }
}

use crate::domain::model::Entity;
use crate::domain::ports::Repository;
use crate::utils::error::{StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Keeps one collection per file (`<base>/<kind>s.json`) as a JSON object
/// keyed by id. Used by the local CLI.
#[derive(Debug)]
pub struct JsonFileRepository<E: Entity> {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> JsonFileRepository<E> {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            path: base_path.as_ref().join(format!("{}s.json", E::KIND)),
            write_lock: Mutex::new(()),
            _entity: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StoreResult<BTreeMap<String, E>> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&data).map_err(|e| {
            StoreError::conversion(format!("{}: {}", self.path.display(), e))
        })
    }

    async fn store(&self, records: &BTreeMap<String, E>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let data = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }

    async fn put(&self, entity: &E) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        records.insert(entity.id().to_string(), entity.clone());
        self.store(&records).await
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for JsonFileRepository<E> {
    async fn save(&self, entity: &E) -> StoreResult<()> {
        self.put(entity).await
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<E>> {
        Ok(self.load().await?.remove(id))
    }

    async fn find_all(&self) -> StoreResult<Vec<E>> {
        Ok(self.load().await?.into_values().collect())
    }

    async fn update(&self, entity: &E) -> StoreResult<()> {
        self.put(entity).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        if records.remove(id).is_some() {
            self.store(&records).await?;
        }
        Ok(())
    }
}

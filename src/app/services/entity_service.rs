use crate::domain::model::Entity;
use crate::domain::patch::Patch;
use crate::domain::ports::Repository;
use crate::utils::error::{AppError, Result, StoreError};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Lifecycle operations shared by every entity type: creation defaults,
/// partial-update merge and delete, on top of a [`Repository`].
///
/// Updates are fetch-merge-write with no version check, so concurrent updates
/// of the same record are last-write-wins.
pub struct EntityService<E: Entity> {
    repo: Arc<dyn Repository<E>>,
}

impl<E: Entity> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

fn store_failure<E: Entity>(action: &str, err: StoreError) -> AppError {
    tracing::error!(kind = E::KIND, error = %err, "{} failed", action);
    AppError::store(action, err)
}

impl<E: Entity> EntityService<E> {
    pub fn new(repo: Arc<dyn Repository<E>>) -> Self {
        Self { repo }
    }

    /// Assigns an identifier when none is given, fills creation defaults and
    /// saves. A caller-supplied identifier that already exists is overwritten.
    #[tracing::instrument(skip(self, entity), fields(kind = E::KIND))]
    pub async fn create(&self, mut entity: E) -> Result<E> {
        if entity.id().is_empty() {
            entity.set_id(Uuid::new_v4().to_string());
        }
        entity.apply_creation_defaults(Utc::now());

        self.repo
            .save(&entity)
            .await
            .map_err(|e| store_failure::<E>(&format!("failed to save {}", E::KIND), e))?;

        tracing::info!(id = entity.id(), "{} created", E::KIND);
        Ok(entity)
    }

    /// `Ok(None)` when nothing is stored under `id`.
    #[tracing::instrument(skip(self), fields(kind = E::KIND))]
    pub async fn get_by_id(&self, id: &str) -> Result<Option<E>> {
        let found = self.repo.find_by_id(id).await.map_err(|e| {
            store_failure::<E>(&format!("failed to find {} by ID", E::KIND), e)
        })?;

        if found.is_none() {
            tracing::debug!("{} not found", E::KIND);
        }
        Ok(found)
    }

    #[tracing::instrument(skip(self), fields(kind = E::KIND))]
    pub async fn get_all(&self) -> Result<Vec<E>> {
        let all = self.repo.find_all().await.map_err(|e| {
            store_failure::<E>(&format!("failed to get all {}s", E::KIND), e)
        })?;

        tracing::debug!(count = all.len(), "listed {}s", E::KIND);
        Ok(all)
    }

    /// Merges `changes` into the stored record and writes the result back.
    ///
    /// Unlike [`get_by_id`](Self::get_by_id), a missing record is an error here.
    #[tracing::instrument(skip(self, changes), fields(kind = E::KIND))]
    pub async fn update(&self, id: &str, changes: impl Into<E::Patch> + Send) -> Result<E> {
        let patch: E::Patch = changes.into();
        patch.validate()?;

        let mut existing = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| {
                store_failure::<E>(&format!("failed to find existing {} for update", E::KIND), e)
            })?
            .ok_or_else(|| AppError::NotFound {
                entity: E::KIND,
                id: id.to_string(),
            })?;

        patch.apply_to(&mut existing);

        self.repo
            .update(&existing)
            .await
            .map_err(|e| store_failure::<E>(&format!("failed to update {}", E::KIND), e))?;

        tracing::info!("{} updated", E::KIND);
        Ok(existing)
    }

    /// Forwards straight to the store; deleting a missing record is whatever
    /// the backend makes of it.
    #[tracing::instrument(skip(self), fields(kind = E::KIND))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| store_failure::<E>(&format!("failed to delete {}", E::KIND), e))?;

        tracing::info!("{} deleted", E::KIND);
        Ok(())
    }
}

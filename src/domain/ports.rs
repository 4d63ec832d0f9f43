use crate::domain::model::{Document, Employee, Entity, Role};
use crate::utils::error::StoreResult;
use async_trait::async_trait;
use std::time::Duration;

/// Keyed CRUD store for one entity type.
///
/// Absence is reported as `Ok(None)` from `find_by_id`, never as an error.
/// `save` and `update` overwrite whatever is stored under the same `id`.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn save(&self, entity: &E) -> StoreResult<()>;
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<E>>;
    async fn find_all(&self) -> StoreResult<Vec<E>>;
    async fn update(&self, entity: &E) -> StoreResult<()>;
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

pub type DocumentRepository = dyn Repository<Document>;
pub type EmployeeRepository = dyn Repository<Employee>;
pub type RoleRepository = dyn Repository<Role>;

/// Issues time-limited upload authorization against a blob store.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Returns a URL that permits a single direct upload of `key` until
    /// `expires_in` has elapsed.
    async fn presign_upload(&self, key: &str, expires_in: Duration) -> StoreResult<String>;
}

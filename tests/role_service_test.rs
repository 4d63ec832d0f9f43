use async_trait::async_trait;
use document_manager::adapters::InMemoryRepository;
use document_manager::{
    AppError, Repository, Role, RolePatch, RoleService, StoreError, StoreResult,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn admin() -> Role {
    Role {
        name: "Admin".to_string(),
        description: "Full access".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn role_lifecycle() {
    let roles = RoleService::new(Arc::new(InMemoryRepository::<Role>::new()));

    let created = roles.create(admin()).await.unwrap();
    assert!(!created.id.is_empty());

    let updated = roles
        .update(
            &created.id,
            Role {
                description: "Everything".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Admin");
    assert_eq!(updated.description, "Everything");

    roles.delete(&created.id).await.unwrap();
    assert!(roles.get_by_id(&created.id).await.unwrap().is_none());
    assert!(roles.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn json_patch_clears_description() {
    let roles = RoleService::new(Arc::new(InMemoryRepository::<Role>::new()));
    let created = roles.create(admin()).await.unwrap();

    let patch: RolePatch = serde_json::from_str(r#"{"description": null}"#).unwrap();
    let updated = roles.update(&created.id, patch).await.unwrap();

    assert_eq!(updated.name, "Admin");
    assert!(updated.description.is_empty());
}

/// Fails every call and counts how often it was asked.
#[derive(Default)]
struct BrokenRepository {
    calls: AtomicUsize,
}

impl BrokenRepository {
    fn fail<T>(&self) -> StoreResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::backend("connection reset"))
    }
}

#[async_trait]
impl Repository<Role> for BrokenRepository {
    async fn save(&self, _entity: &Role) -> StoreResult<()> {
        self.fail()
    }
    async fn find_by_id(&self, _id: &str) -> StoreResult<Option<Role>> {
        self.fail()
    }
    async fn find_all(&self) -> StoreResult<Vec<Role>> {
        self.fail()
    }
    async fn update(&self, _entity: &Role) -> StoreResult<()> {
        self.fail()
    }
    async fn delete(&self, _id: &str) -> StoreResult<()> {
        self.fail()
    }
}

#[tokio::test]
async fn store_failures_are_wrapped_and_not_retried() {
    let repo = Arc::new(BrokenRepository::default());
    let roles = RoleService::new(repo.clone());

    let err = roles.create(admin()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to save role: Storage backend error: connection reset"
    );

    let err = roles.get_by_id("r1").await.unwrap_err();
    assert!(matches!(err, AppError::Store { ref context, .. } if context == "failed to find role by ID"));

    let err = roles.get_all().await.unwrap_err();
    assert!(matches!(err, AppError::Store { ref context, .. } if context == "failed to get all roles"));

    let err = roles.update("r1", admin()).await.unwrap_err();
    assert!(
        matches!(err, AppError::Store { ref context, .. } if context == "failed to find existing role for update")
    );
    assert!(!err.is_not_found());

    let err = roles.delete("r1").await.unwrap_err();
    assert!(matches!(err, AppError::Store { ref context, .. } if context == "failed to delete role"));

    assert_eq!(repo.calls.load(Ordering::SeqCst), 5);
}

use crate::app::context::request_id_or_random;
use crate::app::services::entity_service::EntityService;
use crate::domain::model::{Document, PresignedUpload};
use crate::domain::patch::DocumentPatch;
use crate::domain::ports::{DocumentRepository, FileStorage};
use crate::domain::upload::UploadPolicy;
use crate::utils::error::{AppError, Result};
use chrono::Utc;
use std::sync::Arc;

/// Document lifecycle plus upload coordination.
///
/// Issuing an upload URL and recording a document are independent calls: the
/// key returned by [`request_upload_url`](Self::request_upload_url) is not
/// attached to any document until a caller creates or updates one with it.
#[derive(Clone)]
pub struct DocumentService {
    documents: EntityService<Document>,
    file_storage: Arc<dyn FileStorage>,
    upload_policy: UploadPolicy,
}

impl DocumentService {
    pub fn new(file_storage: Arc<dyn FileStorage>, repo: Arc<DocumentRepository>) -> Self {
        Self::with_upload_policy(file_storage, repo, UploadPolicy::default())
    }

    pub fn with_upload_policy(
        file_storage: Arc<dyn FileStorage>,
        repo: Arc<DocumentRepository>,
        upload_policy: UploadPolicy,
    ) -> Self {
        Self {
            documents: EntityService::new(repo),
            file_storage,
            upload_policy,
        }
    }

    pub fn upload_policy(&self) -> &UploadPolicy {
        &self.upload_policy
    }

    /// Defaults: new UUID when `id` is empty, `upload_date` now, status
    /// `PENDING_UPLOAD`.
    pub async fn create(&self, doc: Document) -> Result<Document> {
        self.documents.create(doc).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Document>> {
        self.documents.get_by_id(id).await
    }

    pub async fn get_all(&self) -> Result<Vec<Document>> {
        self.documents.get_all().await
    }

    pub async fn update(
        &self,
        id: &str,
        changes: impl Into<DocumentPatch> + Send,
    ) -> Result<Document> {
        self.documents.update(id, changes).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.documents.delete(id).await
    }

    /// Builds a fresh storage key for `file_name` and asks the file store for
    /// an upload URL valid for the policy's lifetime. Every call yields a new
    /// key, even for the same file name.
    #[tracing::instrument(skip(self))]
    pub async fn request_upload_url(&self, file_name: &str) -> Result<PresignedUpload> {
        let key = self.upload_policy.storage_key(
            file_name,
            Utc::now().timestamp(),
            &request_id_or_random(),
        );

        let url = self
            .file_storage
            .presign_upload(&key, self.upload_policy.expires_in)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "presigning failed");
                AppError::store("failed to presign upload URL", e)
            })?;

        tracing::info!(key = %key, "upload URL issued");
        Ok(PresignedUpload { url, key })
    }
}

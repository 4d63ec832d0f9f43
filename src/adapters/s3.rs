use crate::domain::ports::FileStorage;
use crate::utils::error::{StoreError, StoreResult};
use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client as S3Client;
use std::time::Duration;

/// Presigns `PutObject` requests against one bucket.
#[derive(Debug, Clone)]
pub struct S3FileStorage {
    client: S3Client,
    bucket: String,
}

impl S3FileStorage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl FileStorage for S3FileStorage {
    #[tracing::instrument(skip(self), fields(bucket = %self.bucket))]
    async fn presign_upload(&self, key: &str, expires_in: Duration) -> StoreResult<String> {
        let presigning = PresigningConfig::expires_in(expires_in).map_err(|e| {
            StoreError::backend(format!("failed to create presigning config: {}", e))
        })?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| {
                StoreError::backend(format!(
                    "failed to presign put object: {}",
                    DisplayErrorContext(e)
                ))
            })?;

        Ok(request.uri().to_string())
    }
}

use crate::domain::ports::FileStorage;
use crate::utils::error::{StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Issues `file://` upload targets under a local directory, stamped with the
/// Unix time at which they stop being honoured.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn presign_upload(&self, key: &str, expires_in: Duration) -> StoreResult<String> {
        let target = std::path::absolute(self.root.join(key))?;
        let mut url = Url::from_file_path(&target).map_err(|_| {
            StoreError::backend(format!("cannot express {} as a file URL", target.display()))
        })?;

        let expires_at = Utc::now().timestamp() + expires_in.as_secs() as i64;
        url.query_pairs_mut()
            .append_pair("expires", &expires_at.to_string());

        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn url_points_inside_root_and_carries_expiry() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path());
        let url = storage
            .presign_upload("uploads/a.pdf_1_req", Duration::from_secs(300))
            .await
            .unwrap();

        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.scheme(), "file");
        assert!(parsed.path().ends_with("/uploads/a.pdf_1_req"));
        let expires: i64 = parsed
            .query_pairs()
            .find(|(k, _)| k == "expires")
            .map(|(_, v)| v.parse().unwrap())
            .unwrap();
        assert!(expires > Utc::now().timestamp());
    }
}

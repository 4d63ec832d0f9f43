use std::time::Duration;

pub const DEFAULT_UPLOAD_PREFIX: &str = "uploads";
pub const DEFAULT_UPLOAD_URL_TTL: Duration = Duration::from_secs(5 * 60);

/// Where uploaded objects land and how long an upload URL stays valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub prefix: String,
    pub expires_in: Duration,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_UPLOAD_PREFIX.to_string(),
            expires_in: DEFAULT_UPLOAD_URL_TTL,
        }
    }
}

impl UploadPolicy {
    /// `{prefix}/{file_name}_{unix_seconds}_{request_id}`.
    ///
    /// The file name is embedded verbatim; it is not checked for separators
    /// or emptiness.
    pub fn storage_key(&self, file_name: &str, unix_seconds: i64, request_id: &str) -> String {
        format!(
            "{}/{}_{}_{}",
            self.prefix, file_name, unix_seconds, request_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_upload_contract() {
        let policy = UploadPolicy::default();
        assert_eq!(policy.prefix, "uploads");
        assert_eq!(policy.expires_in, Duration::from_secs(300));
    }

    #[test]
    fn storage_key_embeds_name_time_and_request() {
        let policy = UploadPolicy::default();
        assert_eq!(
            policy.storage_key("invoice.pdf", 1_714_564_800, "req-42"),
            "uploads/invoice.pdf_1714564800_req-42"
        );
    }

    #[test]
    fn storage_key_does_not_sanitize_file_name() {
        let policy = UploadPolicy {
            prefix: "tenant/a".to_string(),
            ..Default::default()
        };
        assert_eq!(
            policy.storage_key("../x", 1, ""),
            "tenant/a/../x_1_"
        );
    }
}

use crate::domain::upload::{UploadPolicy, DEFAULT_UPLOAD_PREFIX, DEFAULT_UPLOAD_URL_TTL};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{
    validate_key_prefix, validate_path, validate_positive_number, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = "./data";

/// Optional TOML settings for the local CLI.
///
/// ```toml
/// [storage]
/// data_dir = "${HOME}/.document-manager"
///
/// [upload]
/// prefix = "uploads"
/// expires_in_seconds = 300
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub storage: StorageSection,
    pub upload: UploadSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub data_dir: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSection {
    pub prefix: String,
    pub expires_in_seconds: u64,
}

impl Default for UploadSection {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_UPLOAD_PREFIX.to_string(),
            expires_in_seconds: DEFAULT_UPLOAD_URL_TTL.as_secs(),
        }
    }
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| AppError::ConfigParse {
            field: "toml_parsing".to_string(),
            message: e.to_string(),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy {
            prefix: self.upload.prefix.clone(),
            expires_in: Duration::from_secs(self.upload.expires_in_seconds),
        }
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        validate_path("storage.data_dir", &self.storage.data_dir)?;
        validate_key_prefix("upload.prefix", &self.upload.prefix)?;
        validate_positive_number("upload.expires_in_seconds", self.upload.expires_in_seconds, 1)?;
        Ok(())
    }
}

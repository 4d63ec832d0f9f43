use thiserror::Error;

/// Errors raised by repository and file-storage adapters.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend error: {message}")]
    Backend { message: String },

    #[error("Record conversion error: {message}")]
    Conversion { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        Self::Conversion {
            message: message.into(),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum AppError {
    /// Only raised by update operations; plain reads report absence as `Ok(None)`.
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation error: {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("{context}: {source}")]
    Store {
        context: String,
        #[source]
        source: StoreError,
    },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfig { field: String },

    #[error("Configuration parse error in {field}: {message}")]
    ConfigParse { field: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn store(context: impl Into<String>, source: StoreError) -> Self {
        Self::Store {
            context: context.into(),
            source,
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NotFound { entity, id } => format!("No {} exists with ID {}", entity, id),
            Self::Validation { field, reason } => format!("Invalid value for '{}': {}", field, reason),
            Self::Store { context, .. } => format!("Storage operation failed ({})", context),
            Self::InvalidConfigValue { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            Self::MissingConfig { field } => format!("Configuration field '{}' is required", field),
            Self::ConfigParse { field, message } => {
                format!("Could not parse configuration ({}): {}", field, message)
            }
            Self::Io(e) => format!("File access failed: {}", e),
            Self::Serialization(e) => format!("Could not read or write JSON: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

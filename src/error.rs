use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayableError {
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write {path}: {reason}")]
    ConfigWrite { path: PathBuf, reason: String },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Failed to load {resource}: {cause}")]
    DataLoad { resource: String, cause: String },

    #[error("Invalid sort order '{0}'. Use 'first-seen' or 'style'.")]
    InvalidSortOrder(String),

    #[error("Filters are active ({0}). Re-run with --yes to clear them.")]
    ActiveFilters(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PayableError {
    pub fn data_load(resource: impl Into<String>, cause: impl ToString) -> Self {
        PayableError::DataLoad {
            resource: resource.into(),
            cause: cause.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PayableError>;

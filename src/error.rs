use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenduoError {
    #[error("failed to fetch models catalog: {status} {reason}")]
    CatalogFetch { status: u16, reason: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("models catalog is not a JSON object keyed by provider id")]
    CatalogNotAnObject,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Policy parse error: {0}")]
    PolicyParse(#[from] toml::de::Error),

    #[error("Invalid hardening policy: {0}")]
    InvalidPolicy(String),

    #[error("{agent} binary not found at {}", .path.display())]
    BinaryNotFound { agent: String, path: PathBuf },

    #[error("{agent} binary at {} is not executable", .path.display())]
    NotExecutable { agent: String, path: PathBuf },

    #[error("Cannot determine installation root: {0}")]
    InstallRoot(String),

    #[error("failed to execute {}: {source}", .path.display())]
    Exec {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<reqwest::Error> for OpenduoError {
    fn from(err: reqwest::Error) -> Self {
        OpenduoError::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpenduoError>;

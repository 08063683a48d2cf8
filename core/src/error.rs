use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("suggestion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("suggestion request returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode suggestion list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ParseConfig(#[from] toml::de::Error),
}

impl SuggestError {
    pub(crate) fn status(status: StatusCode, body: String) -> Self {
        Self::Status { status, body }
    }

    pub(crate) fn invalid_base_url(url: &str, reason: impl ToString) -> Self {
        Self::InvalidBaseUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SuggestError>;

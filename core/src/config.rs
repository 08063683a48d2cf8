use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Result;
use crate::error::SuggestError;

/// Settings for the suggestion input and the HTTP source behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// Origin of the suggestion service, e.g. `http://127.0.0.1:8000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Quiet window after the last keystroke before a query fires.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum trimmed input length (in characters) that triggers a query.
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    /// Per-request timeout for the HTTP source.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Keep at most this many suggestions from each response.
    #[serde(default)]
    pub max_suggestions: Option<usize>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_query_chars() -> usize {
    2
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
            request_timeout_ms: default_request_timeout_ms(),
            max_suggestions: None,
        }
    }
}

impl SuggestConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| SuggestError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_query_chars == 0 {
            return Err(SuggestError::Config(
                "min_query_chars must be > 0".to_string(),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(SuggestError::Config(
                "request_timeout_ms must be > 0".to_string(),
            ));
        }
        if self.max_suggestions == Some(0) {
            return Err(SuggestError::Config(
                "max_suggestions must be > 0 when set".to_string(),
            ));
        }
        self.parsed_base_url()?;
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub(crate) fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|err| SuggestError::invalid_base_url(&self.base_url, err))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SuggestError::invalid_base_url(
                &self.base_url,
                format!("unsupported scheme {other}"),
            )),
        }
    }
}

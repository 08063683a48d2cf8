use async_trait::async_trait;
use course_search_protocol::Suggestion;
use course_search_protocol::encode_component;

use crate::config::SuggestConfig;
use crate::error::Result;
use crate::error::SuggestError;

const SEARCH_PATH: &str = "/api/courses/search";

/// Anything that can turn a trimmed query into a ranked suggestion list.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>>;
}

/// `GET {base_url}/api/courses/search?query=<text>` against the remote
/// suggestion service.
#[derive(Clone, Debug)]
pub struct HttpSuggestionClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSuggestionClient {
    pub fn new(config: &SuggestConfig) -> Result<Self> {
        let base_url = config.parsed_base_url()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}{SEARCH_PATH}?query={}",
            self.base_url,
            encode_component(query)
        )
    }
}

#[async_trait]
impl SuggestionSource for HttpSuggestionClient {
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>> {
        let url = self.search_url(query);
        tracing::debug!(%url, "requesting suggestions");
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SuggestError::status(status, body));
        }
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

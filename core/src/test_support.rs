use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use course_search_protocol::Suggestion;
use reqwest::StatusCode;
use tokio::sync::oneshot;

use crate::client::SuggestionSource;
use crate::error::Result;
use crate::error::SuggestError;

/// In-memory suggestion source with per-query canned replies. A query can be
/// gated so its reply is held back until the test releases it, which lets
/// tests choose the order in which overlapping responses land.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    calls: Mutex<Vec<String>>,
    replies: Mutex<HashMap<String, Vec<Suggestion>>>,
    failures: Mutex<HashSet<String>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(&self, query: &str, suggestions: Vec<Suggestion>) {
        self.replies
            .lock()
            .unwrap()
            .insert(query.to_string(), suggestions);
    }

    pub(crate) fn fail(&self, query: &str) {
        self.failures.lock().unwrap().insert(query.to_string());
    }

    pub(crate) fn gate(&self, query: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(query.to_string(), rx);
        tx
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SuggestionSource for ScriptedSource {
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>> {
        self.calls.lock().unwrap().push(query.to_string());
        let gate = self.gates.lock().unwrap().remove(query);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.failures.lock().unwrap().contains(query) {
            return Err(SuggestError::status(
                StatusCode::INTERNAL_SERVER_ERROR,
                "scripted failure".to_string(),
            ));
        }
        Ok(self
            .replies
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}

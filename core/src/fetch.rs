//! Turns raw keystrokes into at most one outstanding suggestion query.
//!
//! Each call to [`FetchController::on_input_changed`] starts a new request
//! generation. A result is written to the store only if its generation is
//! still current when it arrives, so responses that come back out of order
//! never overwrite the state produced by a later input.

use std::sync::Arc;
use std::time::Duration;

use course_search_protocol::Suggestion;
use tracing::Instrument;

use crate::client::SuggestionSource;
use crate::config::SuggestConfig;
use crate::debounce::ScheduledTask;
use crate::store::SuggestionStore;

pub struct FetchController {
    source: Arc<dyn SuggestionSource>,
    store: SuggestionStore,
    debounce: Duration,
    min_query_chars: usize,
    max_suggestions: Option<usize>,
    pending: Option<ScheduledTask>,
}

impl FetchController {
    pub fn new(
        source: Arc<dyn SuggestionSource>,
        store: SuggestionStore,
        config: &SuggestConfig,
    ) -> Self {
        Self {
            source,
            store,
            debounce: config.debounce(),
            min_query_chars: config.min_query_chars,
            max_suggestions: config.max_suggestions,
            pending: None,
        }
    }

    /// Schedules a query for `text` after the quiet window, replacing any
    /// query that has not fired yet. Inputs too short to query clear the
    /// list right away.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_input_changed(&mut self, text: &str) {
        self.cancel_pending();
        let generation = self.store.advance_generation();

        if !self.is_queryable(text) {
            self.store.clear_suggestions();
            return;
        }

        let query = text.trim().to_string();
        let source = Arc::clone(&self.source);
        let store = self.store.clone();
        let max_suggestions = self.max_suggestions;
        self.pending = Some(ScheduledTask::after(self.debounce, move || {
            tokio::spawn(
                run_fetch(source, store, generation, query, max_suggestions).in_current_span(),
            );
        }));
    }

    /// Drops the pending query and makes any in-flight result stale without
    /// touching the current list.
    pub fn invalidate(&mut self) {
        self.cancel_pending();
        self.store.advance_generation();
    }

    /// Teardown: nothing scheduled or in flight may touch the store after
    /// this returns.
    pub fn shutdown(&mut self) {
        self.invalidate();
    }

    /// Whether `text`, once trimmed, is long enough to be sent as a query.
    pub fn is_queryable(&self, text: &str) -> bool {
        text.trim().chars().count() >= self.min_query_chars
    }

    pub fn has_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    pub fn store(&self) -> &SuggestionStore {
        &self.store
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.cancel();
        }
    }
}

impl Drop for FetchController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_fetch(
    source: Arc<dyn SuggestionSource>,
    store: SuggestionStore,
    generation: u64,
    query: String,
    max_suggestions: Option<usize>,
) {
    if !store.begin_fetch(generation) {
        tracing::debug!(generation, "query superseded before it fired");
        return;
    }

    let suggestions = match source.search(&query).await {
        Ok(mut suggestions) => {
            if let Some(max) = max_suggestions {
                suggestions.truncate(max);
            }
            suggestions
        }
        Err(err) => {
            tracing::warn!(error = %err, %query, "failed to fetch suggestions");
            Vec::<Suggestion>::new()
        }
    };

    let count = suggestions.len();
    if store.apply(generation, suggestions) {
        tracing::debug!(generation, count, %query, "applied suggestions");
    } else {
        tracing::debug!(generation, %query, "discarding stale suggestions");
    }
}

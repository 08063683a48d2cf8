//! Observable state behind the suggestion input.
//!
//! Every mutation goes through `watch::Sender::send_if_modified`, which holds
//! the channel's write lock for the duration of the closure. The generation
//! check in [`SuggestionStore::apply`] therefore cannot interleave with the
//! bump in [`SuggestionStore::advance_generation`].

use std::sync::Arc;

use course_search_protocol::Suggestion;
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub raw_input: String,
    pub suggestions: Vec<Suggestion>,
    pub loading: bool,
    generation: u64,
}

impl SearchState {
    /// Identifies the input that the current state belongs to. Bumped on
    /// every keystroke, selection and teardown.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Debug)]
pub struct SuggestionStore {
    tx: Arc<watch::Sender<SearchState>>,
}

impl Default for SuggestionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SearchState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> SearchState {
        self.tx.borrow().clone()
    }

    pub fn current_generation(&self) -> u64 {
        self.tx.borrow().generation
    }

    pub(crate) fn set_raw_input(&self, text: &str) {
        self.tx.send_if_modified(|state| {
            if state.raw_input == text {
                return false;
            }
            state.raw_input = text.to_string();
            true
        });
    }

    /// Invalidates whatever fetch is outstanding. Nothing is loading for the
    /// new generation until [`Self::begin_fetch`] says so.
    pub(crate) fn advance_generation(&self) -> u64 {
        let mut next = 0;
        self.tx.send_if_modified(|state| {
            state.generation += 1;
            next = state.generation;
            let was_loading = state.loading;
            state.loading = false;
            was_loading
        });
        next
    }

    pub(crate) fn clear_suggestions(&self) {
        self.tx.send_if_modified(|state| {
            let modified = !state.suggestions.is_empty() || state.loading;
            state.suggestions.clear();
            state.loading = false;
            modified
        });
    }

    /// Marks `generation` as loading. Returns false when it has already been
    /// superseded.
    pub(crate) fn begin_fetch(&self, generation: u64) -> bool {
        let mut current = false;
        self.tx.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            current = true;
            let modified = !state.loading;
            state.loading = true;
            modified
        });
        current
    }

    /// Swaps in the list produced for `generation`, if that is still the
    /// current generation. Stale results are dropped and `false` returned.
    pub(crate) fn apply(&self, generation: u64, suggestions: Vec<Suggestion>) -> bool {
        let mut applied = false;
        self.tx.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            applied = true;
            state.suggestions = suggestions;
            state.loading = false;
            true
        });
        applied
    }
}

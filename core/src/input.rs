use std::fmt;
use std::sync::Arc;

use course_search_protocol::DisplayContext;
use course_search_protocol::NavigationTarget;
use course_search_protocol::RouteType;
use course_search_protocol::Suggestion;
use tokio::sync::watch;

use crate::client::SuggestionSource;
use crate::config::SuggestConfig;
use crate::fetch::FetchController;
use crate::resolver;
use crate::store::SearchState;
use crate::store::SuggestionStore;

/// Caller hook that discards application state tied to the page currently on
/// screen.
pub type ResetHook = Arc<dyn Fn() + Send + Sync>;

/// Router capability. The suggestion input only ever asks it to open a
/// results URL.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Enter,
    Other,
}

/// Everything the embedding page hands to the input.
#[derive(Clone, Default)]
pub struct InputProps {
    pub initial_value: String,
    pub reset_state: Option<ResetHook>,
    pub course: Option<String>,
    pub professor: Option<String>,
    pub route_type: Option<RouteType>,
}

impl fmt::Debug for InputProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputProps")
            .field("initial_value", &self.initial_value)
            .field("reset_state", &self.reset_state.is_some())
            .field("course", &self.course)
            .field("professor", &self.professor)
            .field("route_type", &self.route_type)
            .finish()
    }
}

impl InputProps {
    pub fn display_context(&self) -> DisplayContext {
        DisplayContext {
            current_course_id: self.course.clone(),
            current_professor_name: self.professor.clone(),
            current_route_type: self.route_type,
        }
    }
}

/// The search box: keystrokes in, suggestion list out, navigation on
/// selection.
pub struct SuggestInput {
    store: SuggestionStore,
    fetch: FetchController,
    navigator: Arc<dyn Navigator>,
    reset_state: Option<ResetHook>,
    context: DisplayContext,
}

impl SuggestInput {
    pub fn new(
        props: InputProps,
        source: Arc<dyn SuggestionSource>,
        navigator: Arc<dyn Navigator>,
        config: &SuggestConfig,
    ) -> Self {
        let store = SuggestionStore::new();
        store.set_raw_input(&props.initial_value);
        let context = props.display_context();
        Self {
            fetch: FetchController::new(source, store.clone(), config),
            store,
            navigator,
            reset_state: props.reset_state,
            context,
        }
    }

    pub fn on_change(&mut self, text: &str) {
        self.store.set_raw_input(text);
        self.fetch.on_input_changed(text);
    }

    /// Enter picks the top suggestion, when there is one.
    pub fn on_key(&mut self, key: InputKey) -> Option<NavigationTarget> {
        match key {
            InputKey::Enter => self.select_first(),
            InputKey::Other => None,
        }
    }

    /// Pointer activation on the leading suggestion.
    pub fn activate_leading(&mut self) -> Option<NavigationTarget> {
        self.select_first()
    }

    /// The search button next to the input.
    pub fn trigger_search(&mut self) -> Option<NavigationTarget> {
        self.select_first()
    }

    pub fn select(&mut self, suggestion: &Suggestion) -> NavigationTarget {
        self.fetch.invalidate();
        self.store.clear_suggestions();

        let resolution = resolver::resolve(suggestion, &self.context);
        if resolution.reset_state
            && let Some(reset) = &self.reset_state
        {
            tracing::debug!(text = %suggestion.text, "resetting caller state before navigation");
            reset();
        }

        let url = resolution.target.url();
        tracing::info!(
            category = %resolution.target.category,
            identifier = %resolution.target.identifier,
            %url,
            "navigating to suggestion"
        );
        self.navigator.navigate(&url);
        resolution.target
    }

    /// External change to the `initial_value` prop. Does not query. Whatever
    /// was scheduled or in flight for the replaced text is dropped, and a
    /// value too short to query also clears the list.
    pub fn set_initial_value(&mut self, value: &str) {
        let changed = self.store.snapshot().raw_input != value;
        self.store.set_raw_input(value);
        if !self.fetch.is_queryable(value) {
            self.fetch.invalidate();
            self.store.clear_suggestions();
        } else if changed {
            self.fetch.invalidate();
        }
    }

    pub fn set_display_context(&mut self, context: DisplayContext) {
        self.context = context;
    }

    pub fn set_reset_state(&mut self, reset_state: Option<ResetHook>) {
        self.reset_state = reset_state;
    }

    pub fn display_context(&self) -> &DisplayContext {
        &self.context
    }

    pub fn state(&self) -> SearchState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.store.subscribe()
    }

    pub fn shutdown(&mut self) {
        self.fetch.shutdown();
    }

    fn select_first(&mut self) -> Option<NavigationTarget> {
        let first = self.store.snapshot().suggestions.first().cloned()?;
        Some(self.select(&first))
    }
}

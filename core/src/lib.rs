//! Suggestion core for the course/professor search box.
//!
//! Keystrokes go into [`SuggestInput`], which debounces them through
//! [`FetchController`] into a [`SuggestionSource`] (normally
//! [`HttpSuggestionClient`]). Results land in a [`SuggestionStore`] that
//! renderers observe through a `watch` channel. Picking a suggestion runs it
//! through [`resolver::resolve`] and hands the resulting URL to a
//! [`Navigator`].

pub mod client;
pub mod config;
pub mod debounce;
mod error;
pub mod fetch;
pub mod input;
pub mod resolver;
pub mod store;

#[cfg(test)]
mod test_support;

pub use client::HttpSuggestionClient;
pub use client::SuggestionSource;
pub use config::SuggestConfig;
pub use debounce::ScheduledTask;
pub use error::Result;
pub use error::SuggestError;
pub use fetch::FetchController;
pub use input::InputKey;
pub use input::InputProps;
pub use input::Navigator;
pub use input::ResetHook;
pub use input::SuggestInput;
pub use resolver::Resolution;
pub use store::SearchState;
pub use store::SuggestionStore;

use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumString;

/// What a suggestion points at.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Course,
    Professor,
}

/// A single ranked suggestion as returned by `/api/courses/search`.
///
/// The wire shape is `{ "suggestion": "...", "type": "course" }`; an unknown
/// `type` fails to decode rather than being guessed from the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Suggestion {
    #[serde(rename = "suggestion")]
    pub text: String,
    #[serde(rename = "type")]
    pub category: Category,
}

impl Suggestion {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }

    pub fn course(text: impl Into<String>) -> Self {
        Self::new(text, Category::Course)
    }

    pub fn professor(text: impl Into<String>) -> Self {
        Self::new(text, Category::Professor)
    }
}

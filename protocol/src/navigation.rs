use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumString;

use crate::encoding::encode_component;
use crate::suggestion::Category;

pub const RESULTS_PATH: &str = "/results";

/// Kind of page the caller is currently showing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RouteType {
    Course,
    Professor,
}

/// What the user is looking at before picking a new suggestion. Read-only to
/// the suggestion core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DisplayContext {
    pub current_course_id: Option<String>,
    pub current_professor_name: Option<String>,
    pub current_route_type: Option<RouteType>,
}

impl DisplayContext {
    pub fn course(course_id: impl Into<String>) -> Self {
        Self {
            current_course_id: Some(course_id.into()),
            current_professor_name: None,
            current_route_type: Some(RouteType::Course),
        }
    }

    pub fn professor(name: impl Into<String>) -> Self {
        Self {
            current_course_id: None,
            current_professor_name: Some(name.into()),
            current_route_type: Some(RouteType::Professor),
        }
    }
}

/// Resolved destination for a selected suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct NavigationTarget {
    pub category: Category,
    pub identifier: String,
}

impl NavigationTarget {
    /// `/results?course=<id>` or `/results?professor=<name>`.
    pub fn url(&self) -> String {
        format!(
            "{RESULTS_PATH}?{}={}",
            self.category,
            encode_component(&self.identifier)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn course_target_url() {
        let target = NavigationTarget {
            category: Category::Course,
            identifier: "CSE 3320".to_string(),
        };
        assert_eq!(target.url(), "/results?course=CSE%203320");
    }

    #[test]
    fn professor_target_url() {
        let target = NavigationTarget {
            category: Category::Professor,
            identifier: "Jane Smith".to_string(),
        };
        assert_eq!(target.url(), "/results?professor=Jane%20Smith");
    }

    #[test]
    fn context_constructors_set_route_type() {
        let ctx = DisplayContext::course("CSE 3320");
        assert_eq!(ctx.current_route_type, Some(RouteType::Course));
        assert_eq!(ctx.current_course_id.as_deref(), Some("CSE 3320"));
        assert_eq!(ctx.current_professor_name, None);

        let ctx = DisplayContext::professor("Jane Smith");
        assert_eq!(ctx.current_route_type, Some(RouteType::Professor));
        assert_eq!(ctx.current_professor_name.as_deref(), Some("Jane Smith"));
    }
}

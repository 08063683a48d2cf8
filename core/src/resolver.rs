//! Maps a picked suggestion to the page it should open and decides whether
//! the caller's currently displayed results should be thrown away first.

use course_search_protocol::DisplayContext;
use course_search_protocol::NavigationTarget;
use course_search_protocol::RouteType;
use course_search_protocol::Suggestion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub target: NavigationTarget,
    /// The selection points somewhere other than what is on screen, so the
    /// caller's state hook has to run before navigating.
    pub reset_state: bool,
}

pub fn resolve(selected: &Suggestion, context: &DisplayContext) -> Resolution {
    let reset_state = !(is_same_course(selected, context) || is_same_professor(selected, context));
    Resolution {
        target: NavigationTarget {
            category: selected.category,
            identifier: canonical_identifier(&selected.text),
        },
        reset_state,
    }
}

/// First two whitespace-separated tokens, e.g. `CSE 3320` out of
/// `CSE 3320 OPERATING SYSTEMS`.
pub fn course_prefix_candidate(text: &str) -> String {
    text.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}

/// `<SUBJECT> <NNNN>` when the text starts with a subject and a four digit
/// course number, otherwise the text untouched.
pub fn canonical_identifier(text: &str) -> String {
    let candidate = course_prefix_candidate(text);
    let mut tokens = candidate.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(subject), Some(number)) if is_course_number(number) => {
            format!("{subject} {number}")
        }
        _ => text.to_string(),
    }
}

pub fn is_same_course(selected: &Suggestion, context: &DisplayContext) -> bool {
    context.current_route_type == Some(RouteType::Course)
        && context
            .current_course_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .is_some_and(|id| selected.text.starts_with(id))
}

pub fn is_same_professor(selected: &Suggestion, context: &DisplayContext) -> bool {
    context.current_route_type == Some(RouteType::Professor)
        && context.current_professor_name.as_deref() == Some(selected.text.as_str())
}

fn is_course_number(token: &str) -> bool {
    token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit())
}

// src/controller.rs
// =============================================================================
// The input handlers: what should happen when the user submits the username
// form or clicks a language button.
//
// These functions do not do anything themselves. They return a list of
// Effects, in order, and the session carries them out. That keeps all the
// decisions here testable without a network or a page.
//
// Rust concepts:
// - Enums with data: Effect::Dispatch carries the search to run
// - Pure functions: same input, same output, no side effects
// =============================================================================

use crate::error::{FetchError, ValidationError};
use crate::github::RepositoryRecord;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    User,
    Topic,
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchKind::User => write!(f, "user"),
            SearchKind::Topic => write!(f, "topic"),
        }
    }
}

// One search, from the moment it is dispatched until it is painted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchContext {
    pub kind: SearchKind,
    pub term: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Stop the form from navigating away
    PreventDefault,
    /// Start a fetch for this search
    Dispatch(SearchContext),
    /// Empty the result list
    ClearResults,
    /// Empty the username field
    ClearInput,
    /// Show a blocking message to the user
    Notify(String),
}

// What to do once a fetch has finished
#[derive(Debug)]
pub enum Completion {
    Paint {
        records: Vec<RepositoryRecord>,
        term: String,
        linkable: bool,
    },
    Notify(String),
    /// Nobody handles this error; it goes to the error log
    Unhandled(FetchError),
}

pub fn validate_username(raw: &str) -> Result<String, ValidationError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    Ok(username.to_string())
}

// Form submit
//
// The fetch is dispatched first; the result list and the input field are
// cleared right after, before any response can arrive.
pub fn on_submit_user(raw: &str) -> Vec<Effect> {
    match validate_username(raw) {
        Ok(username) => vec![
            Effect::PreventDefault,
            Effect::Dispatch(SearchContext {
                kind: SearchKind::User,
                term: username,
            }),
            Effect::ClearResults,
            Effect::ClearInput,
        ],
        Err(e) => vec![Effect::PreventDefault, Effect::Notify(e.to_string())],
    }
}

// Language button click
//
// `language` is the data-language attribute of whatever was clicked. No
// attribute means the click missed the buttons, which is not an error.
pub fn on_select_topic(language: Option<&str>) -> Vec<Effect> {
    match language {
        Some(language) if !language.is_empty() => vec![
            Effect::Dispatch(SearchContext {
                kind: SearchKind::Topic,
                term: language.to_string(),
            }),
            Effect::ClearResults,
        ],
        _ => Vec::new(),
    }
}

// Maps a finished fetch to what the page should do
//
// User searches report both HTTP and connection failures. Topic searches
// only report HTTP failures; a connection failure there is left unhandled.
pub fn on_fetch_complete(
    context: SearchContext,
    result: Result<Vec<RepositoryRecord>, FetchError>,
) -> Completion {
    let linkable = context.kind == SearchKind::User;

    match (context.kind, result) {
        (_, Ok(records)) => Completion::Paint {
            records,
            term: context.term,
            linkable,
        },
        (SearchKind::User, Err(e @ FetchError::NotFound)) => Completion::Notify(format!("Error: {}", e)),
        (SearchKind::User, Err(e @ FetchError::Connectivity(_))) => Completion::Notify(e.to_string()),
        (SearchKind::Topic, Err(e @ FetchError::Search(_))) => Completion::Notify(format!("Error: {}", e)),
        (_, Err(e)) => Completion::Unhandled(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    fn user(term: &str) -> SearchContext {
        SearchContext {
            kind: SearchKind::User,
            term: term.to_string(),
        }
    }

    fn topic(term: &str) -> SearchContext {
        SearchContext {
            kind: SearchKind::Topic,
            term: term.to_string(),
        }
    }

    #[test]
    fn test_submit_trims_and_dispatches_once() {
        let effects = on_submit_user("  octocat \n");
        assert_eq!(
            effects,
            vec![
                Effect::PreventDefault,
                Effect::Dispatch(user("octocat")),
                Effect::ClearResults,
                Effect::ClearInput,
            ]
        );
    }

    #[test]
    fn test_submit_blank_is_refused() {
        for raw in ["", "   ", "\t\n"] {
            let effects = on_submit_user(raw);
            assert_eq!(
                effects,
                vec![
                    Effect::PreventDefault,
                    Effect::Notify("Please enter a GitHub username".to_string()),
                ]
            );
        }
    }

    #[test]
    fn test_select_topic() {
        assert_eq!(
            on_select_topic(Some("html")),
            vec![Effect::Dispatch(topic("html")), Effect::ClearResults]
        );
    }

    #[test]
    fn test_select_topic_without_attribute_is_noop() {
        assert!(on_select_topic(None).is_empty());
        assert!(on_select_topic(Some("")).is_empty());
    }

    #[test]
    fn test_complete_success_user_is_linkable() {
        match on_fetch_complete(user("a"), Ok(vec![record("a", "b", 0)])) {
            Completion::Paint { records, term, linkable } => {
                assert_eq!(records.len(), 1);
                assert_eq!(term, "a");
                assert!(linkable);
            }
            other => panic!("unexpected completion: {:?}", other),
        }
    }

    #[test]
    fn test_complete_success_topic_is_not_linkable() {
        match on_fetch_complete(topic("css"), Ok(vec![])) {
            Completion::Paint { linkable, .. } => assert!(!linkable),
            other => panic!("unexpected completion: {:?}", other),
        }
    }

    #[test]
    fn test_complete_user_not_found() {
        match on_fetch_complete(user("nobody"), Err(FetchError::NotFound)) {
            Completion::Notify(message) => assert_eq!(message, "Error: GitHub User Not Found."),
            other => panic!("unexpected completion: {:?}", other),
        }
    }

    #[test]
    fn test_complete_topic_search_error() {
        match on_fetch_complete(topic("css"), Err(FetchError::Search("Service Unavailable".to_string()))) {
            Completion::Notify(message) => assert_eq!(message, "Error: Service Unavailable"),
            other => panic!("unexpected completion: {:?}", other),
        }
    }
}

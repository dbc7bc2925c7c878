// src/error.rs
// =============================================================================
// Error types for a single search.
//
// Every error here ends the action that triggered it. Nothing is retried:
// the user has to submit the form or click a button again.
//
// - ValidationError: the input was rejected before any request was made
// - FetchError: something went wrong between us and GitHub
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[source]: keeps the underlying reqwest error available for logging
// =============================================================================

use thiserror::Error;

// Input that was refused locally
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a GitHub username")]
    EmptyUsername,
}

#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-2xx answer to the user repos request
    #[error("GitHub User Not Found.")]
    NotFound,

    /// Non-2xx answer to the search request; holds the HTTP status text
    #[error("{0}")]
    Search(String),

    /// The request never got an HTTP answer (DNS, refused connection, TLS...)
    #[error("Unable to connect to GitHub")]
    Connectivity(#[source] reqwest::Error),

    /// GitHub answered 2xx but the body was not the JSON we expected
    #[error("Unexpected response body from GitHub: {0}")]
    Decode(#[source] reqwest::Error),
}

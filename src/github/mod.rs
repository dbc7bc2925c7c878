// src/github/mod.rs
// =============================================================================
// This module handles everything that comes from GitHub.
//
// - types: the JSON shapes we read (repositories, search results)
// - fetch: the HTTP client and the two searches
// =============================================================================

mod fetch;
mod types;

pub use fetch::GithubClient;
pub use types::RepositoryRecord;

#[cfg(test)]
pub use types::Owner;

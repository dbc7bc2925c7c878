// src/github/types.rs
// =============================================================================
// The shapes of the GitHub API responses we read.
//
// We only declare the fields we actually use. serde ignores every other
// field in the JSON, so GitHub can add fields without breaking us.
// =============================================================================

use serde::{Deserialize, Serialize};

// One repository as returned by `/users/{user}/repos` or inside the
// `items` array of `/search/repositories`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Repository name without the owner (e.g. "rust")
    pub name: String,
    /// The account that owns the repository
    pub owner: Owner,
    /// Open issues (GitHub counts open pull requests here too)
    pub open_issues_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
}

impl RepositoryRecord {
    // "owner/name", the way GitHub shows a repository
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }
}

// Response body of the repository search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<RepositoryRecord>,
}

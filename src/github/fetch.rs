// src/github/fetch.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Two requests, one per kind of search:
// - GET {api}/users/{username}/repos
// - GET {api}/search/repositories?q={language}is:featured&sort=help-wanted-issues
//
// Each search makes exactly one request. There is no retry, no timeout and
// no backoff: if something goes wrong the user searches again.
//
// Rust concepts:
// - async functions: For network I/O
// - Result with our own error enum: so callers can tell a 404 from a
//   dropped connection
// - Url::path_segments_mut: builds paths with proper escaping
// =============================================================================

use crate::config::USER_AGENT;
use crate::error::FetchError;
use crate::github::types::{RepositoryRecord, SearchResponse};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, StatusCode};
use tracing::debug;
use url::Url;

// A GitHub API client bound to one base URL
//
// Cloning is cheap: reqwest::Client is a reference-counted handle, so each
// spawned search gets its own clone.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    api_base: Url,
}

impl GithubClient {
    pub fn new(api_base: Url) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, api_base })
    }

    // {api}/users/{username}/repos
    //
    // The username is pushed as a single path segment, so characters like
    // '/' or spaces are percent-encoded instead of changing the path.
    pub fn user_repos_url(&self, username: &str) -> Url {
        self.endpoint(&["users", username, "repos"])
    }

    // {api}/search/repositories?q={language}is:featured&sort=help-wanted-issues
    pub fn topic_search_url(&self, language: &str) -> Url {
        let mut url = self.endpoint(&["search", "repositories"]);
        url.query_pairs_mut()
            .clear()
            .append_pair("q", &format!("{}is:featured", language))
            .append_pair("sort", "help-wanted-issues");
        url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        // Config rejects cannot-be-a-base URLs, so this always succeeds
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // Fetches the public repositories of a user
    //
    // Returns:
    //   Ok(records) on any 2xx answer
    //   Err(NotFound) on any other status
    //   Err(Connectivity) if no HTTP answer came back
    pub async fn fetch_by_user(&self, username: &str) -> Result<Vec<RepositoryRecord>, FetchError> {
        let url = self.user_repos_url(username);
        let response = self.get(url).await?;

        if !response.status().is_success() {
            debug!(status = %response.status(), username, "user lookup failed");
            return Err(FetchError::NotFound);
        }

        let records: Vec<RepositoryRecord> = response.json().await.map_err(FetchError::Decode)?;
        debug!(count = records.len(), username, "fetched user repositories");
        Ok(records)
    }

    // Fetches featured repositories for a language, sorted by the number of
    // help-wanted issues
    //
    // Returns the `items` array of the search response. A non-2xx answer
    // becomes Err(Search) carrying the HTTP status text.
    pub async fn fetch_by_topic(&self, language: &str) -> Result<Vec<RepositoryRecord>, FetchError> {
        let url = self.topic_search_url(language);
        let response = self.get(url).await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, language, "repository search failed");
            return Err(FetchError::Search(status_text(status)));
        }

        let payload: SearchResponse = response.json().await.map_err(FetchError::Decode)?;
        debug!(count = payload.items.len(), language, "fetched featured repositories");
        Ok(payload.items)
    }

    async fn get(&self, url: Url) -> Result<Response, FetchError> {
        debug!(%url, "GET");
        self.client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Connectivity)
    }
}

// The reason phrase for a status ("Not Found", "Forbidden", ...), or the bare
// code when the status has no standard phrase
fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

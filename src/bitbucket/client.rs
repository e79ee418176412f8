use anyhow::{Context, Result};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;

use super::types::{Page, PullRequestRef, RawCommit};
use super::CommitSource;
use crate::credentials::Credentials;
use crate::error::ChangelogError;

/// Single fixed page size; results beyond it are not fetched.
pub const PAGE_LIMIT: u32 = 1000;

/// Build the REST base for one repository:
/// `{server}/rest/api/1.0/projects/{project}/repos/{repository}`
pub fn project_base_url(server: &str, project: &str, repository: &str) -> String {
    format!(
        "{}/rest/api/1.0/projects/{}/repos/{}",
        server.trim_end_matches('/'),
        project,
        repository
    )
}

/// Merged pull requests, newest first
pub fn pull_requests_url(base: &str) -> String {
    format!(
        "{}/pull-requests?order=newest&state=MERGED&start=0&limit={}",
        base, PAGE_LIMIT
    )
}

/// Commits belonging to one pull request
pub fn commits_url(base: &str, pull_request_id: u64) -> String {
    format!(
        "{}/pull-requests/{}/commits?start=0&limit={}",
        base, pull_request_id, PAGE_LIMIT
    )
}

/// Decode a list response body, failing if it is not JSON or lacks `values`.
pub fn decode_page<T: DeserializeOwned>(
    body: &str,
    url: &str,
    what: &'static str,
) -> Result<Vec<T>, ChangelogError> {
    let page: Page<T> = serde_json::from_str(body).map_err(|e| ChangelogError::EmptyResult {
        what,
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    page.values.ok_or_else(|| ChangelogError::EmptyResult {
        what,
        url: url.to_string(),
        reason: "response has no 'values' list".to_string(),
    })
}

/// Authenticated client for one Bitbucket Server repository
#[derive(Clone)]
pub struct BitbucketClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

/// Create a client for `{server}` / `{project}` / `{repository}` using basic auth
pub fn create_client(
    server: &str,
    project: &str,
    repository: &str,
    credentials: Credentials,
) -> Result<BitbucketClient> {
    let http = reqwest::Client::builder()
        .user_agent(concat!("prlog/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")?;

    Ok(BitbucketClient {
        http,
        base_url: project_base_url(server, project, repository),
        credentials,
    })
}

impl BitbucketClient {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        url: &str,
        what: &'static str,
    ) -> Result<Vec<T>, ChangelogError> {
        tracing::debug!(%url, "GET");

        let response = self
            .http
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ChangelogError::Transport {
                url: url.to_string(),
                status: None,
                payload: None,
                source: Some(e),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ChangelogError::Transport {
            url: url.to_string(),
            status: Some(status.as_u16()),
            payload: None,
            source: Some(e),
        })?;

        if !status.is_success() {
            return Err(ChangelogError::Transport {
                url: url.to_string(),
                status: Some(status.as_u16()),
                payload: Some(body),
                source: None,
            });
        }

        decode_page(&body, url, what)
    }
}

impl CommitSource for BitbucketClient {
    async fn list_merged_pull_requests(&self) -> Result<Vec<PullRequestRef>, ChangelogError> {
        let url = pull_requests_url(&self.base_url);
        self.get_page(&url, "pull requests").await
    }

    async fn list_pull_request_commits(
        &self,
        pull_request_id: u64,
    ) -> Result<Vec<RawCommit>, ChangelogError> {
        let url = commits_url(&self.base_url, pull_request_id);
        self.get_page(&url, "commits").await
    }
}

use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One page of a Bitbucket Server list endpoint.
///
/// `values` is optional so a response without it can be reported as an
/// empty result instead of a decode failure.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub values: Option<Vec<T>>,
}

/// A merged pull request, reduced to what the changelog needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestRef {
    pub id: u64,
    #[serde(rename = "createdDate", with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub email_address: Option<String>,
}

/// A commit exactly as listed under a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCommit {
    pub id: String,
    #[serde(default)]
    pub message: String,
    #[serde(with = "ts_milliseconds")]
    pub author_timestamp: DateTime<Utc>,
    #[serde(with = "ts_milliseconds")]
    pub committer_timestamp: DateTime<Utc>,
    pub author: Person,
    pub committer: Person,
}

pub mod client;
pub mod types;

pub use client::{create_client, BitbucketClient};
pub use types::{Person, PullRequestRef, RawCommit};

use crate::error::ChangelogError;

/// The two remote calls the changelog pipeline depends on.
///
/// `BitbucketClient` is the real implementation; tests substitute an
/// in-memory source.
#[allow(async_fn_in_trait)]
pub trait CommitSource {
    /// Merged pull requests, newest first, limited to a single page.
    async fn list_merged_pull_requests(&self) -> Result<Vec<PullRequestRef>, ChangelogError>;

    /// Commits listed under one pull request.
    async fn list_pull_request_commits(
        &self,
        pull_request_id: u64,
    ) -> Result<Vec<RawCommit>, ChangelogError>;
}

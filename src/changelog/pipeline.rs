use futures::future::try_join_all;

use super::commit::Commit;
use super::filter::select_commits;
use super::render::render_line;
use super::settings::Settings;
use crate::bitbucket::CommitSource;
use crate::error::ChangelogError;

/// Counters from one run, reported in verbose output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub pull_requests: usize,
    pub commits_fetched: usize,
    pub commits_kept: usize,
}

/// Rendered changelog lines in chronological order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changelog {
    pub lines: Vec<String>,
    pub stats: RunStats,
}

/// Ids of merged pull requests created inside the settings window
pub async fn pull_requests_in_window<S: CommitSource>(
    source: &S,
    settings: &Settings,
) -> Result<Vec<u64>, ChangelogError> {
    let window = settings.window();
    tracing::debug!(
        "Fetching pull requests between {} and {}",
        window.start().to_rfc3339(),
        window.end().to_rfc3339()
    );

    let ids: Vec<u64> = source
        .list_merged_pull_requests()
        .await?
        .into_iter()
        .filter(|pr| window.contains(pr.created_at))
        .map(|pr| pr.id)
        .collect();

    tracing::debug!(?ids, "Pull requests in window");
    Ok(ids)
}

/// Fetch every pull request's commits concurrently and flatten them in
/// pull request order. The first failure aborts the whole fetch.
pub async fn fetch_commits<S: CommitSource>(
    source: &S,
    pull_request_ids: &[u64],
) -> Result<Vec<Commit>, ChangelogError> {
    let per_pull_request = try_join_all(
        pull_request_ids
            .iter()
            .map(|id| source.list_pull_request_commits(*id)),
    )
    .await?;

    Ok(per_pull_request
        .into_iter()
        .flatten()
        .map(Commit::from)
        .collect())
}

/// Collect the changelog for the settings window.
///
/// Pull requests are selected by creation date, their commits fetched in
/// parallel, then deduplicated, filtered, sorted and rendered.
pub async fn collect_commits<S: CommitSource>(
    source: &S,
    settings: &Settings,
) -> Result<Changelog, ChangelogError> {
    let ids = pull_requests_in_window(source, settings).await?;
    let commits = fetch_commits(source, &ids).await?;
    let commits_fetched = commits.len();

    let selected = select_commits(commits, settings);
    let lines: Vec<String> = selected
        .iter()
        .map(|commit| render_line(commit, settings.timestamp_format()))
        .collect();

    let stats = RunStats {
        pull_requests: ids.len(),
        commits_fetched,
        commits_kept: lines.len(),
    };
    tracing::debug!(?stats, "Changelog collected");

    Ok(Changelog { lines, stats })
}

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::commit::Commit;
use super::settings::Settings;

static MERGE_COMMIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^merge").expect("Invalid merge commit regex"));

/// Keep the first commit seen for each id, preserving order
pub fn dedupe_by_id(commits: Vec<Commit>) -> Vec<Commit> {
    let mut seen_ids = HashSet::new();
    commits
        .into_iter()
        .filter(|commit| seen_ids.insert(commit.id.clone()))
        .collect()
}

/// Auto-generated merge commits start with "merge", in any case
pub fn is_merge_commit(message: &str) -> bool {
    MERGE_COMMIT_REGEX.is_match(message)
}

/// Whether a commit survives every configured filter
pub fn keeps(commit: &Commit, settings: &Settings) -> bool {
    let message_ok = settings
        .message_filter()
        .is_none_or(|re| re.is_match(&commit.message));
    let in_window = settings.window().contains(commit.committed_at);
    let email_ok = settings
        .email()
        .is_none_or(|email| commit.committer_email.as_deref() == Some(email));

    message_ok && in_window && !is_merge_commit(&commit.message) && email_ok
}

/// Sort by committer timestamp, oldest first. Stable: ties keep input order.
pub fn sort_by_committed(commits: &mut [Commit]) {
    commits.sort_by_key(|commit| commit.committed_at);
}

/// Dedupe, filter and sort: the selection half of the pipeline
pub fn select_commits(commits: Vec<Commit>, settings: &Settings) -> Vec<Commit> {
    let mut selected: Vec<_> = dedupe_by_id(commits)
        .into_iter()
        .filter(|commit| keeps(commit, settings))
        .collect();
    sort_by_committed(&mut selected);
    selected
}

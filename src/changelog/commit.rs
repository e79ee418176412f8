use chrono::{DateTime, Utc};

use crate::bitbucket::RawCommit;

/// A commit as the changelog sees it: flattened people, normalized message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
    pub author: String,
    pub authored_at: DateTime<Utc>,
    pub committer: String,
    pub committed_at: DateTime<Utc>,
    pub committer_email: Option<String>,
    pub message: String,
}

impl From<RawCommit> for Commit {
    fn from(raw: RawCommit) -> Self {
        Self {
            id: raw.id,
            author: raw.author.name,
            authored_at: raw.author_timestamp,
            committer: raw.committer.name,
            committed_at: raw.committer_timestamp,
            committer_email: raw.committer.email_address,
            message: normalize_message(&raw.message),
        }
    }
}

/// Fold a multi-line message onto one line.
///
/// Real newlines and literal `\n` sequences become spaces, then each
/// non-overlapping pair of whitespace characters collapses to one space.
pub fn normalize_message(message: &str) -> String {
    let single_line = message.replace('\n', " ").replace("\\n", " ");

    let mut out = String::with_capacity(single_line.len());
    let mut chars = single_line.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            if let Some(next) = chars.peek().copied() {
                if next.is_whitespace() {
                    chars.next();
                    out.push(' ');
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitbucket::Person;

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_message("BAC-1 fix\nmore"), "BAC-1 fix more");
    }

    #[test]
    fn test_normalize_escaped_newlines() {
        assert_eq!(normalize_message("BAC-1 fix\\nmore"), "BAC-1 fix more");
    }

    #[test]
    fn test_normalize_paragraph_break() {
        // "\n\n" -> two spaces -> one space
        assert_eq!(normalize_message("title\n\nbody"), "title body");
    }

    #[test]
    fn test_normalize_collapses_pairs_only() {
        // Three spaces: the first pair collapses, the third survives
        assert_eq!(normalize_message("a   b"), "a  b");
        assert_eq!(normalize_message("a    b"), "a  b");
    }

    #[test]
    fn test_normalize_crlf() {
        assert_eq!(normalize_message("a\r\nb"), "a b");
    }

    #[test]
    fn test_normalize_single_spaces_untouched() {
        assert_eq!(normalize_message("plain message"), "plain message");
    }

    #[test]
    fn test_from_raw_commit() {
        let ts = DateTime::from_timestamp_millis(1_704_456_000_000).unwrap();
        let raw = RawCommit {
            id: "abc".to_string(),
            message: "Fix\nthings".to_string(),
            author_timestamp: ts,
            committer_timestamp: ts,
            author: Person {
                name: "ann".to_string(),
                email_address: Some("ann@example.com".to_string()),
            },
            committer: Person {
                name: "bob".to_string(),
                email_address: Some("bob@example.com".to_string()),
            },
        };

        let commit = Commit::from(raw);
        assert_eq!(commit.author, "ann");
        assert_eq!(commit.committer, "bob");
        assert_eq!(commit.committer_email.as_deref(), Some("bob@example.com"));
        assert_eq!(commit.message, "Fix things");
    }
}

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while building settings or collecting a changelog.
///
/// Nothing in the pipeline recovers from these: any of them aborts the run
/// before output is produced.
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Network failure or a non-success HTTP status.
    ///
    /// `status` and `payload` are set when the server answered; `payload` is
    /// the raw response body so callers can show the server's own message.
    #[error("request to {url} failed{}", status_suffix(.status))]
    Transport {
        url: String,
        status: Option<u16>,
        payload: Option<String>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The response could not be decoded or lacked the `values` list.
    #[error("no {what} found in response from {url}: {reason}")]
    EmptyResult {
        what: &'static str,
        url: String,
        reason: String,
    },

    /// The configured commit message filter is not a valid pattern.
    #[error("invalid message filter pattern: {0}")]
    RegexCompile(#[from] regex::Error),

    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid timestamp format '{0}'")]
    InvalidDateFormat(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" with status {}", s)).unwrap_or_default()
}

impl ChangelogError {
    /// Body returned by the server for a failed request, if any.
    pub fn server_payload(&self) -> Option<&str> {
        match self {
            ChangelogError::Transport { payload, .. } => payload.as_deref().filter(|p| !p.is_empty()),
            _ => None,
        }
    }

    /// True when the server rejected the credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ChangelogError::Transport { status: Some(401), .. })
    }

    /// True for failures caused by settings rather than the remote API.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ChangelogError::RegexCompile(_)
                | ChangelogError::InvalidDateRange { .. }
                | ChangelogError::InvalidDateFormat(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display_with_status() {
        let err = ChangelogError::Transport {
            url: "https://example.com/x".to_string(),
            status: Some(401),
            payload: Some("{\"errors\":[]}".to_string()),
            source: None,
        };
        assert_eq!(
            err.to_string(),
            "request to https://example.com/x failed with status 401"
        );
        assert_eq!(err.server_payload(), Some("{\"errors\":[]}"));
        assert!(!err.is_config_error());
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_other_failures_are_not_auth() {
        let server_error = ChangelogError::Transport {
            url: "https://example.com/x".to_string(),
            status: Some(500),
            payload: None,
            source: None,
        };
        assert!(!server_error.is_auth_failure());

        let empty = ChangelogError::EmptyResult {
            what: "commits",
            url: "https://example.com/x".to_string(),
            reason: "missing".to_string(),
        };
        assert!(!empty.is_auth_failure());
    }

    #[test]
    fn test_transport_without_payload() {
        let err = ChangelogError::Transport {
            url: "https://example.com/x".to_string(),
            status: Some(500),
            payload: Some(String::new()),
            source: None,
        };
        assert_eq!(err.server_payload(), None);
    }

    #[test]
    fn test_regex_error_is_config_error() {
        let err: ChangelogError = regex::Regex::new("(").unwrap_err().into();
        assert!(err.is_config_error());
        assert!(err.to_string().starts_with("invalid message filter pattern"));
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project key used when the config file does not name one
pub const DEFAULT_PROJECT: &str = "BAC";

fn default_project() -> String {
    DEFAULT_PROJECT.to_string()
}

/// Contents of `~/.config/prlog/config.yaml`. The password is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Bitbucket Server root, e.g. `https://bitbucket.example.com`
    pub server: String,
    #[serde(default = "default_project")]
    pub project: String,
    pub repository: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_regex: Option<String>,
    /// strftime pattern for the timestamp suffix; empty disables it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports_dir: Option<PathBuf>,
}

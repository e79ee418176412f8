pub mod prompt;

use std::fmt;

/// Environment variable name for providing the password without a prompt
pub const ENV_PASSWORD_VAR: &str = "PRLOG_PASSWORD";

pub use prompt::{prompt_for_password, resolve_password};

/// Basic-auth credentials passed through to every API request
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep the password out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Check for a password in the PRLOG_PASSWORD environment variable.
/// Returns Some(password) if the env var is set and not blank, None otherwise.
/// The value is passed through untrimmed.
pub fn get_password_from_env() -> Option<String> {
    password_from_value(std::env::var(ENV_PASSWORD_VAR).ok())
}

fn password_from_value(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

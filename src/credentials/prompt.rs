use anyhow::{Context, Result};

use super::get_password_from_env;

/// Prompts user to enter the Bitbucket password for `username`
pub fn prompt_for_password(username: &str) -> Result<String> {
    let password = rpassword::prompt_password(format!("Password for {}: ", username))
        .context("Failed to read password from terminal")?;

    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }

    Ok(password)
}

/// Password from PRLOG_PASSWORD, falling back to an interactive prompt
pub fn resolve_password(username: &str) -> Result<String> {
    if let Some(password) = get_password_from_env() {
        tracing::debug!("Using password from environment");
        return Ok(password);
    }

    prompt_for_password(username)
}

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::{default_reports_dir, get_config_path, save_config, Config, DEFAULT_PROJECT};
use crate::changelog::settings::validate_date_format;
use crate::changelog::DEFAULT_DATE_FORMAT;

/// Pattern offered when the user chooses to filter commit messages
const SUGGESTED_MESSAGE_REGEX: &str = r"^BAC-[0-9]{1,}\s.*";

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    Ok(pick_default(input, default))
}

fn pick_default(input: String, default: &str) -> String {
    if input.is_empty() {
        default.to_string()
    } else {
        input
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    Ok(parse_yes_no(&input, default_yes))
}

fn parse_yes_no(input: &str, default_yes: bool) -> bool {
    let input = input.to_lowercase();
    if input.is_empty() {
        default_yes
    } else {
        input == "y" || input == "yes"
    }
}

/// Prompt until a non-empty answer is given, offering `default` when set.
fn prompt_required(message: &str, default: Option<&str>) -> Result<String> {
    loop {
        let input = match default.filter(|d| !d.is_empty()) {
            Some(d) => prompt_with_default(message, d)?,
            None => prompt(&format!("{}: ", message))?,
        };
        if !input.is_empty() {
            return Ok(input);
        }
        println!("  {} is required.", message);
    }
}

/// Answer taken from an earlier config, offered as the prompt default
fn previous_answer<'a>(existing: Option<&'a Config>, pick: fn(&Config) -> Option<&str>) -> Option<&'a str> {
    existing.and_then(pick)
}

/// Run the interactive init wizard to create a config file.
///
/// Answers from an existing config (if any) are offered as defaults.
/// If `default_path` is Some, uses that as the config file path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    let existing = super::load_config(Some(default_config_path.clone())).ok();

    println!();
    println!("prlog configuration");
    println!("===================");
    println!();

    let prior = existing.as_ref();
    let server = prompt_required(
        "Bitbucket server URL (e.g. https://bitbucket.example.com)",
        previous_answer(prior, |c| Some(c.server.as_str())),
    )?;
    let project = prompt_with_default(
        "Project key",
        previous_answer(prior, |c| Some(c.project.as_str())).unwrap_or(DEFAULT_PROJECT),
    )?;
    let repository = prompt_required(
        "Repository slug",
        previous_answer(prior, |c| Some(c.repository.as_str())),
    )?;
    let username = prompt_required(
        "Username",
        previous_answer(prior, |c| Some(c.username.as_str())),
    )?;

    println!();
    let previous_email = previous_answer(prior, |c| c.email_filter.as_deref());
    let email_filter = if prompt_yes_no("Filter by committer e-mail?", previous_email.is_some())? {
        Some(prompt_required("Committer e-mail", previous_email)?)
    } else {
        None
    };

    let previous_regex = previous_answer(prior, |c| c.message_regex.as_deref());
    let message_regex = if prompt_yes_no("Filter commit messages?", previous_regex.is_some())? {
        let default = previous_regex.unwrap_or(SUGGESTED_MESSAGE_REGEX);
        loop {
            let input = prompt_with_default("Message pattern", default)?;
            match regex::Regex::new(&input) {
                Ok(_) => break Some(input),
                Err(e) => println!("  Invalid pattern: {}. Try again.", e),
            }
        }
    } else {
        None
    };

    println!();
    println!("Timestamps use strftime syntax; enter 'none' to leave them out.");
    let date_format = loop {
        let default = previous_answer(prior, |c| c.date_format.as_deref()).unwrap_or(DEFAULT_DATE_FORMAT);
        let input = prompt_with_default("Timestamp format", default)?;
        if input == "none" {
            break Some(String::new());
        }
        match validate_date_format(&input) {
            Ok(_) if input == DEFAULT_DATE_FORMAT => break None,
            Ok(_) => break Some(input),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    let default_reports = default_reports_dir()?;
    let reports_dir = prompt_with_default(
        "Where should HTML reports be written?",
        &prior
            .and_then(|c| c.reports_dir.clone())
            .unwrap_or_else(|| default_reports.clone())
            .display()
            .to_string(),
    )?;
    let reports_dir = Some(PathBuf::from(reports_dir)).filter(|p| *p != default_reports);

    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = Config {
        server,
        project,
        repository,
        username,
        email_filter,
        message_regex,
        date_format,
        reports_dir,
    };
    save_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("The password is not stored; set PRLOG_PASSWORD or enter it when asked.");
    println!("Run `prlog` to get started.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_default() {
        assert_eq!(pick_default(String::new(), "BAC"), "BAC");
        assert_eq!(pick_default("OPS".to_string(), "BAC"), "OPS");
    }

    #[test]
    fn test_parse_yes_no() {
        assert!(parse_yes_no("", true));
        assert!(!parse_yes_no("", false));
        assert!(parse_yes_no("Y", false));
        assert!(parse_yes_no("yes", false));
        assert!(!parse_yes_no("n", true));
        assert!(!parse_yes_no("nope", true));
    }

    #[test]
    fn test_suggested_regex_compiles() {
        let re = regex::Regex::new(SUGGESTED_MESSAGE_REGEX).unwrap();
        assert!(re.is_match("BAC-123 add report"));
        assert!(!re.is_match("BAC-123"));
    }
}

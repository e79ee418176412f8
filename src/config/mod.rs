pub mod init;
mod schema;

pub use init::run_init_wizard;
pub use schema::{Config, DEFAULT_PROJECT};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{Datelike, NaiveDate};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::changelog::{DateWindow, Settings, DEFAULT_DATE_FORMAT};
use crate::error::ChangelogError;

/// Get the config directory path (~/.config/prlog/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("prlog"))
}

/// Get the default config file path (~/.config/prlog/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Directory for HTML reports when neither flag nor config names one
pub fn default_reports_dir() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("reports"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/prlog/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Run `prlog init` to create one",
            config_path.display()
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

/// Save configuration as YAML, atomically, creating parent directories
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .context("Failed to write config")?;
    file.commit()
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub email: Option<String>,
    pub message_regex: Option<String>,
    pub no_message_filter: bool,
    pub date_format: Option<String>,
    pub no_timestamps: bool,
}

/// Default range: first day of `today`'s month through `today`
pub fn default_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today.with_day(1).unwrap_or(today), today)
}

/// Merge config file and overrides into validated pipeline settings
pub fn build_settings(
    config: &Config,
    overrides: &Overrides,
    today: NaiveDate,
) -> Result<Settings, ChangelogError> {
    let (default_from, default_to) = default_range(today);
    let window = DateWindow::new(
        overrides.from.unwrap_or(default_from),
        overrides.to.unwrap_or(default_to),
    )?;

    let email = overrides.email.as_deref().or(config.email_filter.as_deref());

    let message_regex = if overrides.no_message_filter {
        None
    } else {
        overrides
            .message_regex
            .as_deref()
            .or(config.message_regex.as_deref())
    };

    let date_format = if overrides.no_timestamps {
        None
    } else {
        Some(
            overrides
                .date_format
                .as_deref()
                .or(config.date_format.as_deref())
                .unwrap_or(DEFAULT_DATE_FORMAT),
        )
    };

    Settings::with_window(window)
        .email_filter(email)
        .message_regex(message_regex)?
        .date_format(date_format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            server: "https://git.example.com".to_string(),
            project: "BAC".to_string(),
            repository: "back-office".to_string(),
            username: "ann".to_string(),
            email_filter: Some("ann@example.com".to_string()),
            message_regex: Some("^BAC-".to_string()),
            date_format: Some("%Y-%m-%d".to_string()),
            reports_dir: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_range() {
        assert_eq!(default_range(date(2024, 3, 17)), (date(2024, 3, 1), date(2024, 3, 17)));
        assert_eq!(default_range(date(2024, 3, 1)), (date(2024, 3, 1), date(2024, 3, 1)));
    }

    #[test]
    fn test_build_settings_from_config() {
        let settings = build_settings(&sample_config(), &Overrides::default(), date(2024, 3, 17)).unwrap();
        assert_eq!(settings.window().start_date(), date(2024, 3, 1));
        assert_eq!(settings.window().end_date(), date(2024, 3, 17));
        assert_eq!(settings.email(), Some("ann@example.com"));
        assert_eq!(settings.message_filter().map(|r| r.as_str()), Some("^BAC-"));
        assert_eq!(settings.timestamp_format(), Some("%Y-%m-%d"));
    }

    #[test]
    fn test_overrides_win() {
        let overrides = Overrides {
            from: Some(date(2024, 1, 1)),
            to: Some(date(2024, 1, 10)),
            email: Some("bob@example.com".to_string()),
            message_regex: Some("^OPS-".to_string()),
            date_format: Some("%H:%M".to_string()),
            ..Overrides::default()
        };
        let settings = build_settings(&sample_config(), &overrides, date(2024, 3, 17)).unwrap();
        assert_eq!(settings.window().start_date(), date(2024, 1, 1));
        assert_eq!(settings.window().end_date(), date(2024, 1, 10));
        assert_eq!(settings.email(), Some("bob@example.com"));
        assert_eq!(settings.message_filter().map(|r| r.as_str()), Some("^OPS-"));
        assert_eq!(settings.timestamp_format(), Some("%H:%M"));
    }

    #[test]
    fn test_disable_flags() {
        let overrides = Overrides {
            no_message_filter: true,
            no_timestamps: true,
            ..Overrides::default()
        };
        let settings = build_settings(&sample_config(), &overrides, date(2024, 3, 17)).unwrap();
        assert!(settings.message_filter().is_none());
        assert_eq!(settings.timestamp_format(), None);
    }

    #[test]
    fn test_default_date_format_applies() {
        let mut config = sample_config();
        config.date_format = None;
        let settings = build_settings(&config, &Overrides::default(), date(2024, 3, 17)).unwrap();
        assert_eq!(settings.timestamp_format(), Some(DEFAULT_DATE_FORMAT));
    }

    #[test]
    fn test_invalid_regex_surfaces_as_config_error() {
        let mut config = sample_config();
        config.message_regex = Some("(".to_string());
        let err = build_settings(&config, &Overrides::default(), date(2024, 3, 17)).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_reversed_dates_rejected() {
        let overrides = Overrides {
            from: Some(date(2024, 2, 1)),
            to: Some(date(2024, 1, 1)),
            ..Overrides::default()
        };
        let err = build_settings(&sample_config(), &overrides, date(2024, 3, 17)).unwrap_err();
        assert!(matches!(err, ChangelogError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("config.yaml");

        save_config(&path, &sample_config()).unwrap();
        let loaded = load_config(Some(path)).unwrap();

        assert_eq!(loaded, sample_config());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let err = load_config(Some(temp.path().join("absent.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use regex::Regex;

use super::window::DateWindow;
use crate::error::ChangelogError;

/// Timestamp suffix format used when none is configured
pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%y %H:%M:%S";

/// Everything one pipeline run needs besides the API client.
///
/// Built once, validated up front, then only read.
#[derive(Debug, Clone)]
pub struct Settings {
    window: DateWindow,
    email_filter: Option<String>,
    message_filter: Option<Regex>,
    date_format: Option<String>,
}

impl Settings {
    /// No filters and the default timestamp format
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, ChangelogError> {
        Ok(Self::with_window(DateWindow::new(start_date, end_date)?))
    }

    pub fn with_window(window: DateWindow) -> Self {
        Self {
            window,
            email_filter: None,
            message_filter: None,
            date_format: Some(DEFAULT_DATE_FORMAT.to_string()),
        }
    }

    /// Keep only commits whose committer email equals `email` exactly.
    /// An empty value means no filter.
    pub fn email_filter(mut self, email: Option<&str>) -> Self {
        self.email_filter = email.filter(|e| !e.is_empty()).map(str::to_string);
        self
    }

    /// Keep only commits whose normalized message matches `pattern`.
    /// An empty value means no filter.
    pub fn message_regex(mut self, pattern: Option<&str>) -> Result<Self, ChangelogError> {
        self.message_filter = match pattern.filter(|p| !p.is_empty()) {
            Some(p) => Some(Regex::new(p)?),
            None => None,
        };
        Ok(self)
    }

    /// strftime pattern for the timestamp suffix; `None` or empty disables it.
    pub fn date_format(mut self, format: Option<&str>) -> Result<Self, ChangelogError> {
        self.date_format = match format.filter(|f| !f.is_empty()) {
            Some(f) => {
                validate_date_format(f)?;
                Some(f.to_string())
            }
            None => None,
        };
        Ok(self)
    }

    pub fn window(&self) -> &DateWindow {
        &self.window
    }

    pub fn email(&self) -> Option<&str> {
        self.email_filter.as_deref()
    }

    pub fn message_filter(&self) -> Option<&Regex> {
        self.message_filter.as_ref()
    }

    pub fn timestamp_format(&self) -> Option<&str> {
        self.date_format.as_deref()
    }
}

/// Reject strftime patterns chrono cannot render
pub fn validate_date_format(format: &str) -> Result<(), ChangelogError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ChangelogError::InvalidDateFormat(format.to_string()));
    }
    Ok(())
}

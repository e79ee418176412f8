use std::sync::LazyLock;

use chrono::Local;
use regex::Regex;

use super::commit::Commit;
use super::emoji;

static LEADING_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:([A-Za-z0-9_+\-]+):").expect("Invalid leading emoji code regex")
});

/// Swap a leading `:code:` token for its glyph.
///
/// Only a token at position 0 is considered. Codes missing from the table
/// are removed rather than left as text.
pub fn replace_leading_code(message: &str) -> String {
    LEADING_CODE_REGEX
        .replace(message, |caps: &regex::Captures| {
            emoji::glyph(&caps[1]).unwrap_or_default().to_string()
        })
        .into_owned()
}

/// Render one changelog line: message, then the committer timestamp in
/// parentheses when `date_format` is set, trimmed.
pub fn render_line(commit: &Commit, date_format: Option<&str>) -> String {
    let message = replace_leading_code(&commit.message);
    let line = match date_format {
        Some(format) => format!(
            "{} ({})",
            message,
            commit.committed_at.with_timezone(&Local).format(format)
        ),
        None => message,
    };
    line.trim().to_string()
}

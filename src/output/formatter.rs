use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Header naming the active filters, printed above the changelog
/// Format: "Result: {pattern} {email}" with "-" for an unset filter
pub fn format_header(message_pattern: Option<&str>, email: Option<&str>, use_colors: bool) -> String {
    let pattern = message_pattern.unwrap_or("-");
    let email = email.unwrap_or("-");

    if use_colors {
        format!("{} {} {}", "Result:".green(), pattern.blue(), email.blue())
    } else {
        format!("Result: {} {}", pattern, email)
    }
}

/// Format changelog lines for the console, one per line
pub fn format_changelog(lines: &[String]) -> String {
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_header_plain() {
        assert_eq!(
            format_header(Some("^BAC-"), Some("dev@example.com"), false),
            "Result: ^BAC- dev@example.com"
        );
    }

    #[test]
    fn test_format_header_without_filters() {
        assert_eq!(format_header(None, None, false), "Result: - -");
    }

    #[test]
    fn test_format_header_colored_keeps_text() {
        let header = format_header(Some("^BAC-"), None, true);
        assert!(header.contains("Result:"));
        assert!(header.contains("^BAC-"));
        assert!(header.contains('\u{1b}'));
    }

    #[test]
    fn test_format_changelog() {
        let lines = vec!["a (01-01-24 10:00:00)".to_string(), "b".to_string()];
        assert_eq!(format_changelog(&lines), "a (01-01-24 10:00:00)\nb");
        assert_eq!(format_changelog(&[]), "");
    }
}

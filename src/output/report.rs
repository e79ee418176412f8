use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::NaiveDate;
use std::io::Write;
use std::path::{Path, PathBuf};

const REPORT_STYLE: &str = "body { font-family: -apple-system, BlinkMacSystemFont, \"Segoe UI\", Helvetica, Arial, sans-serif; margin: 2rem; color: #24292f; }
h1 { font-size: 1.4rem; }
ul { padding-left: 1.2rem; }
li { margin: 0.3rem 0; line-height: 1.4; }";

/// Escape text for use inside HTML element content
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render changelog lines as a standalone HTML page, one `<li>` per line
pub fn render_html_report(title: &str, lines: &[String]) -> String {
    let title = escape_html(title);
    let items: String = lines
        .iter()
        .map(|line| format!("\n<li>{}</li>", escape_html(line)))
        .collect();
    let list = if items.is_empty() {
        "<ul></ul>".to_string()
    } else {
        format!("<ul>{}\n</ul>", items)
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n{REPORT_STYLE}\n</style>\n</head>\n<body>\n<h1>{title}</h1>\n{list}\n</body>\n</html>\n"
    )
}

/// Report file name for a date range: `DD-MM-YYYY-TO-DD-MM-YYYY.html`
pub fn report_file_name(start: NaiveDate, end: NaiveDate) -> String {
    format!("{}-TO-{}.html", start.format("%d-%m-%Y"), end.format("%d-%m-%Y"))
}

/// Human title for a date range, used as the page title
pub fn report_title(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "Changelog {} to {}",
        start.format("%d-%m-%Y"),
        end.format("%d-%m-%Y")
    )
}

/// Write the HTML report for `[start, end]` into `dir` atomically
///
/// Creates `dir` if needed and returns the path of the written file.
pub fn write_report(dir: &Path, start: NaiveDate, end: NaiveDate, lines: &[String]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create reports directory at {}", dir.display()))?;

    let path = dir.join(report_file_name(start, end));
    let html = render_html_report(&report_title(start, end), lines);

    let mut file = AtomicWriteFile::open(&path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(html.as_bytes())
        .context("Failed to write HTML report")?;
    file.commit().context("Failed to save HTML report")?;

    tracing::info!(path = %path.display(), "HTML report written");
    Ok(path)
}

pub mod formatter;
pub mod report;

pub use formatter::{format_changelog, format_header, should_use_colors};
pub use report::{render_html_report, report_file_name, write_report};

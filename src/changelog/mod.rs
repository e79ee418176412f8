pub mod commit;
pub mod emoji;
pub mod filter;
pub mod pipeline;
pub mod render;
pub mod settings;
pub mod window;

pub use commit::{normalize_message, Commit};
pub use filter::{dedupe_by_id, is_merge_commit, select_commits};
pub use pipeline::{collect_commits, Changelog, RunStats};
pub use render::{render_line, replace_leading_code};
pub use settings::{Settings, DEFAULT_DATE_FORMAT};
pub use window::DateWindow;

pub mod bitbucket;
pub mod changelog;
pub mod config;
pub mod credentials;
pub mod error;
pub mod output;

pub use error::ChangelogError;

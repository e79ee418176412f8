use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use prlog::changelog::Settings;
use prlog::config::{Config, Overrides};
use prlog::ChangelogError;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create or update the config file interactively
    Init,
}

/// Options for printing the changelog (the default action)
#[derive(Args, Debug, Default, Clone)]
struct CollectArgs {
    /// First day of the range, YYYY-MM-DD (defaults to the first of this month)
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,

    /// Last day of the range, YYYY-MM-DD (defaults to today)
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,

    /// Only keep commits whose committer e-mail equals this address
    #[arg(long)]
    email: Option<String>,

    /// Only keep commits whose message matches this pattern
    #[arg(long, conflicts_with = "no_message_filter")]
    message_regex: Option<String>,

    /// Ignore any message pattern from the config file
    #[arg(long)]
    no_message_filter: bool,

    /// strftime format for the timestamp suffix
    #[arg(long, conflicts_with = "no_timestamps")]
    date_format: Option<String>,

    /// Leave timestamps off the changelog lines
    #[arg(long)]
    no_timestamps: bool,

    /// Also write an HTML report
    #[arg(long)]
    html: bool,

    /// Directory for the HTML report (implies --html)
    #[arg(long)]
    reports_dir: Option<PathBuf>,

    /// Bitbucket username, overriding the config file
    #[arg(long)]
    username: Option<String>,
}

#[derive(Parser, Debug)]
#[command(name = "prlog")]
#[command(about = "Changelog from merged Bitbucket pull requests", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/prlog/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    collect: CollectArgs,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "prlog=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

impl CollectArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            from: self.from,
            to: self.to,
            email: self.email.clone(),
            message_regex: self.message_regex.clone(),
            no_message_filter: self.no_message_filter,
            date_format: self.date_format.clone(),
            no_timestamps: self.no_timestamps,
        }
    }
}

/// Print a pipeline failure the way the user needs to see it: the server's
/// payload when there is one, otherwise the error chain.
fn report_failure(error: &ChangelogError) {
    eprintln!("Error: {}", error);
    if let Some(payload) = error.server_payload() {
        eprintln!("{}", payload);
    } else {
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
    }
}

async fn run_collect(config: Config, args: CollectArgs, verbose: bool) -> i32 {
    let start_time = Instant::now();
    let today = Local::now().date_naive();

    let settings: Settings = match prlog::config::build_settings(&config, &args.overrides(), today) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return EXIT_CONFIG;
        }
    };

    let username = args.username.clone().unwrap_or_else(|| config.username.clone());
    let password = match prlog::credentials::resolve_password(&username) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Credential error: {}", e);
            return EXIT_AUTH;
        }
    };
    let credentials = prlog::credentials::Credentials::new(username, password);

    let client = match prlog::bitbucket::create_client(
        &config.server,
        &config.project,
        &config.repository,
        credentials,
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create Bitbucket client: {:#}", e);
            return EXIT_NETWORK;
        }
    };
    tracing::debug!(base_url = client.base_url(), "Client ready");

    let changelog = match prlog::changelog::collect_commits(&client, &settings).await {
        Ok(c) => c,
        Err(e) => {
            report_failure(&e);
            return if e.is_auth_failure() { EXIT_AUTH } else { EXIT_NETWORK };
        }
    };

    let use_colors = prlog::output::should_use_colors();
    println!(
        "{}",
        prlog::output::format_header(
            settings.message_filter().map(|r| r.as_str()),
            settings.email(),
            use_colors
        )
    );
    if changelog.lines.is_empty() {
        eprintln!("No commits found.");
    } else {
        println!("{}", prlog::output::format_changelog(&changelog.lines));
    }

    if args.html || args.reports_dir.is_some() {
        let dir = match args.reports_dir.clone().or(config.reports_dir.clone()) {
            Some(d) => d,
            None => match prlog::config::default_reports_dir() {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    return EXIT_CONFIG;
                }
            },
        };
        let window = settings.window();
        match prlog::output::write_report(&dir, window.start_date(), window.end_date(), &changelog.lines) {
            Ok(path) => eprintln!("Report written to {}", path.display()),
            Err(e) => {
                eprintln!("Failed to write report: {:#}", e);
                return EXIT_CONFIG;
            }
        }
    }

    if verbose {
        let stats = changelog.stats;
        eprintln!();
        eprintln!(
            "{} pull requests, {} commits fetched, {} listed in {:?}",
            stats.pull_requests,
            stats.commits_fetched,
            stats.commits_kept,
            start_time.elapsed()
        );
    }

    EXIT_SUCCESS
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);

    let code = match cli.command {
        Some(Commands::Init) => match prlog::config::run_init_wizard(config_path) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                EXIT_CONFIG
            }
        },
        None => {
            let config = match prlog::config::load_config(config_path) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            tracing::debug!(
                server = %config.server,
                project = %config.project,
                repository = %config.repository,
                "Loaded config"
            );
            run_collect(config, cli.collect, cli.verbose).await
        }
    };

    std::process::exit(code);
}

mod catalog;
mod commands;
mod config;
mod error;
mod fetch;
mod rank;
mod render;
mod types;

use clap::{CommandFactory, Parser, ValueHint};
use clap_complete::Shell;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::commands::{generate_completions, rank_command};
use crate::config::{
    Credentials, RankConfig, DEFAULT_API_URL, DEFAULT_CATALOG_URL, DEFAULT_CONCURRENCY,
};
use crate::render::OutputFormat;

#[derive(Parser)]
#[command(name = "starrank")]
#[command(
    about = "Rank a catalog of GitHub repositories by stars, forks, watchers and subscribers",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// GitHub username, sent as Basic auth
    #[arg(allow_hyphen_values = true)]
    username: Option<String>,
    /// GitHub password or personal access token
    #[arg(allow_hyphen_values = true)]
    password: Option<String>,
    /// Where the ranked list goes
    #[arg(value_enum, default_value_t = OutputFormat::File)]
    format: OutputFormat,
    /// JSON catalog of {owner, repo} entries
    #[arg(long, value_hint = ValueHint::Url, default_value = DEFAULT_CATALOG_URL)]
    catalog_url: String,
    /// GitHub REST API base URL
    #[arg(long, value_hint = ValueHint::Url, default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Maximum number of detail requests in flight
    #[arg(long, short = 'j', default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,
    /// Per-request timeout in seconds (none by default)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
    /// Directory the file formats write into
    #[arg(long, short = 'o', value_hint = ValueHint::DirPath, default_value = ".")]
    output_dir: PathBuf,
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn write_usage(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "Please input your GitHub account. GitHub limits authenticated requests to 5000 per hour."
    )?;
    writeln!(
        out,
        "ex: starrank <username> <password> <file|table|markdown (default is file)>"
    )?;
    writeln!(out)?;
    Cli::command().write_help(out)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("warn,starrank={}", level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        generate_completions(shell);
        return Ok(());
    }

    let (username, password) = match (cli.username, cli.password) {
        (Some(username), Some(password)) => (username, password),
        _ => {
            write_usage(&mut io::stderr())?;
            std::process::exit(1);
        }
    };

    init_logging(cli.verbose);

    let config = RankConfig::new(Credentials::new(username, password), cli.format)
        .with_catalog_url(cli.catalog_url)
        .with_api_url(cli.api_url)
        .with_concurrency(cli.concurrency)
        .with_timeout(cli.timeout.map(Duration::from_secs))
        .with_output_dir(cli.output_dir);

    rank_command(&config).await?;
    Ok(())
}

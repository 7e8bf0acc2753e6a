use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};

use gh_traffic::config::prompt_credentials;
use gh_traffic::data::save_report;
use gh_traffic::render::render_text;
use gh_traffic::{Config, Credentials, TrafficReportBuilder};

const USAGE_EXAMPLE: &str = "gh-traffic --token YOUR_TOKEN --owner username --repo reponame";

#[derive(Parser)]
#[command(name = "gh-traffic")]
#[command(version, about = "GitHub repository traffic analyzer")]
#[command(
    long_about = "Fetches views, clones, referrers and popular paths of a GitHub repository, \
                  prints a summary and saves the full report as JSON. \
                  Run without arguments to be prompted for credentials."
)]
struct Cli {
    /// GitHub Personal Access Token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Repository owner username
    #[arg(long)]
    owner: String,

    /// Repository name
    #[arg(long)]
    repo: String,

    /// Include the raw daily views and clones in the saved report
    #[arg(long)]
    detailed: bool,

    /// Directory the JSON report is written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args_os().len() == 1 {
        return interactive().await;
    }

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let credentials = Credentials::new(cli.token, cli.owner, cli.repo);
    if let Err(e) = credentials.validate() {
        eprintln!("Usage: {USAGE_EXAMPLE}");
        return Err(e.into());
    }

    run(credentials, cli.detailed, &cli.output_dir).await
}

/// Prompts for credentials on the terminal and builds a detailed report.
async fn interactive() -> Result<()> {
    init_logging(false);

    let credentials = prompt_credentials(io::stdin().lock(), io::stdout())?;
    if credentials.validate().is_err() {
        println!("Missing required information!");
        println!("\nUsage example:");
        println!("{USAGE_EXAMPLE}");
        return Ok(());
    }

    run(credentials, true, Path::new(".")).await
}

async fn run(credentials: Credentials, detailed: bool, output_dir: &Path) -> Result<()> {
    let config = Config::from_env();
    let builder = TrafficReportBuilder::with_api_base(credentials, &config.api_base)?;

    let report = builder.build_report(detailed).await;
    println!("{}", render_text(&report)?);

    let creds = builder.credentials();
    let path = save_report(&report, output_dir, &creds.owner, &creds.repo, Local::now())
        .with_context(|| format!("Failed to save report to {}", output_dir.display()))?;
    println!("\nReport saved to: {}", path.display());

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("gh_traffic=debug")
    } else {
        EnvFilter::new("gh_traffic=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

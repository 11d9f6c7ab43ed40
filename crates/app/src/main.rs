use anyhow::{Context, Result};
use banksync_import::{load_transactions, Config};
use banksync_ledger::LedgerClient;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod report;
mod sync;

/// Route bank CSV exports into a personal-finance ledger.
#[derive(Parser, Debug)]
#[command(name = "banksync", version, long_about = None)]
struct Cli {
    /// Path to a CSV file to import
    #[arg(long)]
    csv: PathBuf,

    /// Path to the TOML config file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Match and report without posting anything
    #[arg(long)]
    dry_run: bool,

    /// Report only transactions that no rule matched (useful with --dry-run)
    #[arg(long)]
    show_no_match: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Rules are validated before a single row is read.
    let config = Config::load(&cli.config)
        .with_context(|| format!("load config {}", cli.config.display()))?;
    let transactions = load_transactions(&cli.csv)
        .with_context(|| format!("read {}", cli.csv.display()))?;
    info!(
        rows = transactions.len(),
        rules = config.engine.len(),
        "loaded export"
    );

    let client = match config.url.as_deref() {
        Some(url) => Some(
            LedgerClient::new(url, config.token.as_deref()).context("create ledger client")?,
        ),
        None => {
            warn!("no ledger url configured, running without lookups or posting");
            None
        }
    };

    let options = sync::RunOptions {
        dry_run: cli.dry_run,
        show_no_match: cli.show_no_match,
    };
    let mut stdout = std::io::stdout().lock();
    let summary = sync::run(&transactions, &config, client.as_ref(), options, &mut stdout).await?;

    info!(
        rows = summary.rows,
        matched = summary.matched,
        skipped = summary.skipped,
        posted = summary.posted,
        dry_run = cli.dry_run,
        "sync finished"
    );
    Ok(())
}

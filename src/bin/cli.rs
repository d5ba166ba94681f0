//! Linkhub Crawler CLI
//!
//! Local execution entry point, meant to be run from cron.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use linkhub_crawler::{
    error::Result,
    models::Config,
    pipeline::{self, RunContext, RunReport},
    services::{ApiClient, DryRunRegistry, Fetcher, HttpRenderer, LinkRegistry},
    storage::{HistoryStorage, LocalStorage},
};

/// Forum crawlers feeding the linkhub API
#[derive(Parser, Debug)]
#[command(name = "linkhub-crawler", version, about = "Ppomppu crawlers for linkhub")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Fetch and extract, but register nothing and keep history untouched
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Register new board posts as links
    #[command(alias = "jjizzle")]
    Passthrough,

    /// Register URLs found in marked posts
    #[command(alias = "naverpay")]
    Harvest,

    /// Publish today's quiz answers as one digest
    Quiz,

    /// Run all three crawlers in order
    All,

    /// Validate the configuration file
    Validate,

    /// Show history file sizes
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn build_registry(config: &Config, dry_run: bool) -> Result<Box<dyn LinkRegistry>> {
    if dry_run {
        log::info!("Dry run: nothing will be registered or saved");
        return Ok(Box::new(DryRunRegistry));
    }
    let key = config.api.resolve_key()?;
    Ok(Box::new(ApiClient::new(&config.api, key)?))
}

fn report(name: &str, report: &RunReport) {
    log::info!(
        "{} finished: {} new, {} skipped ({} local, {} remote)",
        name,
        report.stats.registered,
        report.stats.skipped(),
        report.stats.locally_duplicate,
        report.stats.remote_duplicate
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::info!("Loaded configuration from {}", cli.config.display());

    let storage = LocalStorage::new(config.data_dir());

    match cli.command {
        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
            return Ok(());
        }

        Command::Info => {
            log::info!("Data directory: {}", config.data_dir().display());
            let files = [
                ("passthrough", &config.passthrough.history_file),
                ("harvest", &config.harvest.history_file),
                ("quiz", &config.quiz.history_file),
            ];
            for (name, file) in files {
                match storage.load_history(file).await {
                    Ok(Some(keys)) => log::info!("{:<12} {} ({} posts)", name, file, keys.len()),
                    Ok(None) => log::info!("{:<12} {} (not found)", name, file),
                    Err(e) => log::warn!("{:<12} {} (unreadable: {})", name, file, e),
                }
            }
            return Ok(());
        }

        _ => {}
    }

    config.validate()?;
    let registry = build_registry(&config, cli.dry_run)?;
    let renderer = Arc::new(HttpRenderer::new(&config.crawler)?);
    let fetcher = Fetcher::from_config(renderer, &config.crawler);
    let ctx = RunContext {
        fetcher: &fetcher,
        registry: registry.as_ref(),
        storage: &storage,
        dry_run: cli.dry_run,
    };

    let command = cli.command;
    if matches!(command, Command::Passthrough | Command::All) {
        report("passthrough", &pipeline::run_passthrough(&config, &ctx).await?);
    }
    if matches!(command, Command::Harvest | Command::All) {
        report("harvest", &pipeline::run_harvest(&config, &ctx).await?);
    }
    if matches!(command, Command::Quiz | Command::All) {
        let result = pipeline::run_quiz(&config, &ctx).await?;
        if let Some(digest) = &result.digest {
            log::info!("Digest:\n{}", digest);
        }
        report("quiz", &result);
    }

    Ok(())
}

//! battlepack-opener - opens every unopened Battlefield 4 battlepack.
//!
//! Prompts for Origin account credentials, logs in to Battlelog, and opens
//! all unopened battlepacks at once, reporting how many succeeded.

mod args;
mod driver;
mod prompt;
mod report;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use battlepack_core::{ApiClient, ConcurrencyLimit, Config, Pipeline};

use args::Args;
use prompt::PromptSource;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_tracing();
    info!("battlepack-opener starting");

    if let Err(e) = run(args).await {
        eprintln!("Unable to open battlepacks: {:#}", e);
        eprintln!();
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };

    let limit = match args.concurrency {
        Some(n) => ConcurrencyLimit::from(Some(n)),
        None => config.concurrency_limit(),
    };
    info!(limit = %limit, base_url = %config.base_url, "Configuration loaded");

    let client = ApiClient::new(&config).context("Failed to create HTTP client")?;
    let pipeline = Pipeline::new(client, limit).with_progress(report::progress);

    let mut source = PromptSource::from_env();
    let run_report = driver::run(&pipeline, &mut source, config.max_login_attempts).await?;
    report::print(&run_report);

    Ok(())
}

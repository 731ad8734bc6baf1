//! Command-line arguments.

use clap::Parser;

const AFTER_HELP: &str = "\
Environment:
  BATTLEPACK_EMAIL, BATTLEPACK_PASSWORD  Credentials for the first login attempt
  RUST_LOG                               Log filter (default: warn)";

/// Logs in to Battlelog and opens every unopened Battlefield 4 battlepack.
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "battlepack-opener", version, about, after_help = AFTER_HELP)]
pub struct Args {
    /// Open at most N battlepacks at a time (0 = no limit)
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,
}

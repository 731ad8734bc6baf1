//! Core library for battlepack-opener.
//!
//! Talks to the Battlelog mobile API to exchange credentials for a session,
//! list the battlepacks owned by the active Battlefield 4 persona, and open
//! every unopened one concurrently.
//!
//! The pipeline is strictly sequential (authenticate, list, open, summarize)
//! except inside [`batch::open_all`], where each open request runs
//! independently and a failure is recorded against its own pack only.

pub mod api;
pub mod auth;
pub mod batch;
pub mod config;
pub mod inventory;
pub mod models;
pub mod pipeline;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, ApiError, BattlelogService};
pub use auth::{CredentialFormatError, Credentials, Session};
pub use batch::{open_all, summarize, BatchSummary, ConcurrencyLimit};
pub use config::Config;
pub use inventory::list_unopened;
pub use models::{Battlepack, BattlepackRecord, OpenFailure, OpenOutcome, OpenStatus};
pub use pipeline::{Pipeline, Progress, RunReport};

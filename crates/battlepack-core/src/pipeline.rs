//! The authenticate, list, open, summarize pipeline.
//!
//! Stages run one after another; only the open stage fans out. A failure
//! while authenticating or listing aborts the run, because neither a partial
//! session nor a partial pack list is usable. Failures while opening are
//! recorded per pack and never abort anything.

use tracing::info;

use crate::api::{ApiError, BattlelogService};
use crate::auth::Credentials;
use crate::batch::{open_all, summarize, BatchSummary, ConcurrencyLimit};
use crate::inventory::list_unopened;
use crate::models::OpenOutcome;

/// Milestones reported while a run is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Authenticated,
    /// Listing finished; about to open this many packs.
    Listed { unopened: usize },
}

/// Result of one complete run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    /// Every pack on the account was already open; nothing was attempted.
    NothingToOpen,
    Opened {
        summary: BatchSummary,
        outcomes: Vec<OpenOutcome>,
    },
}

type ProgressFn = Box<dyn Fn(Progress) + Send + Sync>;

pub struct Pipeline<S> {
    service: S,
    limit: ConcurrencyLimit,
    on_progress: Option<ProgressFn>,
}

impl<S: BattlelogService> Pipeline<S> {
    pub fn new(service: S, limit: ConcurrencyLimit) -> Self {
        Self {
            service,
            limit,
            on_progress: None,
        }
    }

    pub fn with_progress(mut self, f: impl Fn(Progress) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn report(&self, progress: Progress) {
        if let Some(ref f) = self.on_progress {
            f(progress);
        }
    }

    /// Run once with the given credentials. They are dropped as soon as the
    /// token exchange finishes.
    pub async fn run(&self, credentials: Credentials) -> Result<RunReport, ApiError> {
        let session = self.service.authenticate(&credentials).await?;
        drop(credentials);
        self.report(Progress::Authenticated);

        let packs = list_unopened(&self.service, &session).await?;
        self.report(Progress::Listed { unopened: packs.len() });

        if packs.is_empty() {
            info!("All battlepacks are already open");
            return Ok(RunReport::NothingToOpen);
        }

        let outcomes = open_all(&self.service, &session, &packs, self.limit).await;
        let summary = summarize(&outcomes);
        info!(succeeded = summary.succeeded, failed = summary.failed, "Batch complete");

        Ok(RunReport::Opened { summary, outcomes })
    }
}

use std::fmt;

use crate::models::{Battlepack, OpenFailure, OpenOutcome};

/// Success/failure counts over a settled batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Nothing was attempted; not the same as everything failing.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} opened, {} failed", self.succeeded, self.failed)
    }
}

/// Count outcomes by status. Order-independent.
pub fn summarize(outcomes: &[OpenOutcome]) -> BatchSummary {
    outcomes.iter().fold(BatchSummary::default(), |mut summary, outcome| {
        if outcome.is_success() {
            summary.succeeded += 1;
        } else {
            summary.failed += 1;
        }
        summary
    })
}

/// Failed packs with their causes, for diagnostic output.
pub fn failures(outcomes: &[OpenOutcome]) -> impl Iterator<Item = (&Battlepack, &OpenFailure)> + '_ {
    outcomes
        .iter()
        .filter_map(|o| o.failure().map(|failure| (&o.battlepack, failure)))
}

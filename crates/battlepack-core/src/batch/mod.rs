//! Batch opening of battlepacks.
//!
//! - `open_all`: fan out one open request per pack, settle every one
//! - `summarize`: count successes and failures over the settled outcomes

pub mod opener;
pub mod summary;

pub use opener::{open_all, ConcurrencyLimit};
pub use summary::{failures, summarize, BatchSummary};

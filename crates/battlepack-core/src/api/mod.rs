//! Battlelog mobile API module.
//!
//! This module provides the `ApiClient` for communicating with the
//! Battlelog mobile endpoints, and the `BattlelogService` trait the rest of
//! the pipeline is written against.
//!
//! Authentication exchanges an e-mail and password for a session key that
//! is sent as the `X-Session-Id` header on every later request.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;

use async_trait::async_trait;

use crate::auth::{Credentials, Session};
use crate::models::{Battlepack, BattlepackRecord, OpenFailure};

/// The three remote operations the pipeline needs.
#[async_trait]
pub trait BattlelogService: Send + Sync {
    /// Exchange credentials for a session bound to the BF4 persona.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, ApiError>;

    /// Fetch every battlepack record owned by the session's persona.
    async fn fetch_battlepacks(&self, session: &Session) -> Result<Vec<BattlepackRecord>, ApiError>;

    /// Open a single battlepack. Failures are per-pack and never escalate.
    async fn open_battlepack(&self, session: &Session, pack: &Battlepack) -> Result<(), OpenFailure>;
}

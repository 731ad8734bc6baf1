use std::fmt;

use serde::{Deserialize, Serialize};

use super::Battlepack;

/// Why a single open request did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpenFailure {
    /// The request never produced a response (connect, TLS, timeout, ...).
    Transport(String),
    /// The server answered with something other than 200.
    Status(u16),
}

impl fmt::Display for OpenFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenFailure::Transport(msg) => write!(f, "network error: {}", msg),
            OpenFailure::Status(code) => write!(f, "server returned status {}", code),
        }
    }
}

impl From<reqwest::Error> for OpenFailure {
    fn from(err: reqwest::Error) -> Self {
        OpenFailure::Transport(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpenStatus {
    Opened,
    Failed(OpenFailure),
}

/// Terminal result of one battlepack's open attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOutcome {
    pub battlepack: Battlepack,
    pub status: OpenStatus,
}

impl OpenOutcome {
    pub fn opened(battlepack: Battlepack) -> Self {
        Self {
            battlepack,
            status: OpenStatus::Opened,
        }
    }

    pub fn failed(battlepack: Battlepack, failure: OpenFailure) -> Self {
        Self {
            battlepack,
            status: OpenStatus::Failed(failure),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OpenStatus::Opened)
    }

    pub fn failure(&self) -> Option<&OpenFailure> {
        match &self.status {
            OpenStatus::Opened => None,
            OpenStatus::Failed(failure) => Some(failure),
        }
    }
}

impl From<(Battlepack, Result<(), OpenFailure>)> for OpenOutcome {
    fn from((battlepack, result): (Battlepack, Result<(), OpenFailure>)) -> Self {
        match result {
            Ok(()) => OpenOutcome::opened(battlepack),
            Err(failure) => OpenOutcome::failed(battlepack, failure),
        }
    }
}

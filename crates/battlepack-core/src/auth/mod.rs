//! Authentication module for credentials and sessions.
//!
//! This module provides:
//! - `Credentials`: a validated e-mail/password pair, used once and dropped
//! - `Session`: the session key and persona id returned by the token exchange
//!
//! Neither is ever written to disk; a session lives for one process run.

pub mod credentials;
pub mod session;

pub use credentials::{CredentialFormatError, Credentials};
pub use session::Session;

//! Login retry loop around the pipeline.
//!
//! A rejected login sends the user back to the credential prompt and the
//! pipeline starts over. The loop is iterative, so stack use stays flat no
//! matter how many attempts are made.

use anyhow::{bail, Result};
use battlepack_core::{BattlelogService, Credentials, Pipeline, RunReport};
use tracing::{info, warn};

pub const INVALID_LOGIN: &str = "The e-mail or password you entered is invalid.";

/// Supplies credentials for each login attempt.
pub trait CredentialSource {
    fn collect(&mut self) -> Result<Credentials>;
}

/// Run the pipeline until a login succeeds. `max_attempts` of `None` keeps
/// asking indefinitely. Errors other than a rejected login end the run.
pub async fn run<S, C>(pipeline: &Pipeline<S>, source: &mut C, max_attempts: Option<u32>) -> Result<RunReport>
where
    S: BattlelogService,
    C: CredentialSource + ?Sized,
{
    let mut attempts: u32 = 0;

    loop {
        let credentials = source.collect()?;
        attempts += 1;
        info!(attempt = attempts, "Logging in");

        match pipeline.run(credentials).await {
            Err(e) if e.is_auth_failure() => {
                warn!(attempt = attempts, error = %e, "Login rejected");
                eprintln!("{}", INVALID_LOGIN);
                eprintln!();

                if max_attempts.is_some_and(|max| attempts >= max) {
                    bail!("Giving up after {} failed login attempts", attempts);
                }
            }
            result => return Ok(result?),
        }
    }
}

//! Interactive credential collection.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use battlepack_core::auth::credentials::is_valid_email;
use battlepack_core::Credentials;
use tracing::{debug, warn};

use crate::driver::CredentialSource;

const EMAIL_PROMPT: &str = "Origin Account e-mail: ";
const PASSWORD_PROMPT: &str = "Password: ";

/// Asks on the terminal, optionally seeded with credentials from the
/// environment for the first attempt.
pub struct PromptSource {
    preset: Option<Credentials>,
}

impl PromptSource {
    /// Seed from `BATTLEPACK_EMAIL` / `BATTLEPACK_PASSWORD` when both are set.
    pub fn from_env() -> Self {
        let email = std::env::var("BATTLEPACK_EMAIL").ok();
        let password = std::env::var("BATTLEPACK_PASSWORD").ok();

        let preset = match (email, password) {
            (Some(email), Some(password)) => match Credentials::new(&email, &password) {
                Ok(creds) => {
                    debug!("Using credentials from environment for first attempt");
                    Some(creds)
                }
                Err(e) => {
                    warn!(error = %e, "Ignoring credentials from environment");
                    None
                }
            },
            _ => None,
        };

        Self { preset }
    }
}

impl CredentialSource for PromptSource {
    fn collect(&mut self) -> Result<Credentials> {
        if let Some(creds) = self.preset.take() {
            return Ok(creds);
        }

        let stdin = io::stdin();
        let email = read_email(&mut stdin.lock(), &mut io::stdout(), &mut io::stderr())?;
        let password = read_password()?;
        Ok(Credentials::new(&email, &password)?)
    }
}

/// Prompt until a well-formed address is entered.
fn read_email<R: BufRead, W: Write, E: Write>(input: &mut R, out: &mut W, err: &mut E) -> Result<String> {
    loop {
        write!(out, "{}", EMAIL_PROMPT)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("No e-mail address entered");
        }

        let email = line.trim();
        if is_valid_email(email) {
            return Ok(email.to_string());
        }
        writeln!(err, "Invalid e-mail address")?;
    }
}

fn read_password() -> Result<String> {
    loop {
        let password = rpassword::prompt_password(PASSWORD_PROMPT)?;
        if !password.is_empty() {
            return Ok(password);
        }
        eprintln!("Password required");
    }
}

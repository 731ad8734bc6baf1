use std::fmt;

use thiserror::Error;

/// Local validation failure, raised before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialFormatError {
    #[error("Invalid e-mail address")]
    InvalidEmail,

    #[error("Password required")]
    EmptyPassword,
}

/// Origin account e-mail and password.
///
/// Only constructible through [`Credentials::new`], so a value of this type
/// always carries a well-formed address and a non-empty password.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Result<Self, CredentialFormatError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(CredentialFormatError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(CredentialFormatError::EmptyPassword);
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Characters allowed in an unquoted local part (RFC 5322 atext).
fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~".contains(c)
}

fn is_valid_dot_atom(s: &str, allowed: fn(char) -> bool) -> bool {
    !s.is_empty() && s.split('.').all(|part| !part.is_empty() && part.chars().all(allowed))
}

fn is_valid_domain_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Syntactic check of a single `local@domain` address.
/// No display names, quoted local parts or domain literals.
pub fn is_valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.rsplit_once('@') else {
        return false;
    };
    local.len() <= 64
        && domain.len() <= 255
        && is_valid_dot_atom(local, is_atext)
        && domain.split('.').all(is_valid_domain_label)
}

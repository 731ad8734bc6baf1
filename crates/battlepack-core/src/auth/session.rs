use std::fmt;

/// Authenticated Battlelog session.
///
/// Produced by the token exchange and then only read. The session key goes
/// out as the `X-Session-Id` header; the persona id selects the BF4 soldier
/// whose battlepacks are listed and opened.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    session_id: String,
    persona_id: String,
}

impl Session {
    /// Build a session from a completed token exchange.
    /// Intended for `BattlelogService` implementations only.
    pub fn new(session_id: impl Into<String>, persona_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            persona_id: persona_id.into(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn persona_id(&self) -> &str {
        &self.persona_id
    }
}

// Session keys are bearer secrets; keep them out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &"<redacted>")
            .field("persona_id", &self.persona_id)
            .finish()
    }
}

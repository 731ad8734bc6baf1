//! API client for the Battlelog mobile endpoints.
//!
//! This module provides the `ApiClient` struct, the HTTP implementation of
//! [`BattlelogService`]. All requests are form-encoded and carry the fixed
//! headers the Battlelog Android app sends.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::auth::{Credentials, Session};
use crate::config::Config;
use crate::models::{
    deserialize_string_or_number, Battlepack, BattlepackRecord, BattlepacksResponse, OpenFailure,
};

use super::{ApiError, BattlelogService};

// ============================================================================
// Constants
// ============================================================================

/// Battlelog game id for Battlefield 4; also the key of the BF4 persona.
const GAME_ID: &str = "2048";

/// Battlelog platform id sent with pack requests.
const PLATFORM_ID: &str = "64";

/// Header carrying the session key on authenticated requests.
const SESSION_HEADER: &str = "x-session-id";

/// Used when a failed login carries no message of its own.
const DEFAULT_AUTH_ERROR: &str = "The e-mail or password you entered is invalid.";

const BUNDLE_ID: &str = "com.ea.bf3bl.inc";
const BUNDLE_VERSION: &str = "243";
const APP_VERSION: &str = "2.0.0";

const USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 4.4.4; Nexus 7 Build/KTU84P) \
AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/33.0.0.0 Safari/537.36 \
BattlelogMobile/2.5.0 (Language: en; Capabilities: scanQRCode; Dimensions: 1200x1824; Density: 2.0; )";

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    success: serde_json::Value,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    data: Option<TokenData>,
}

#[derive(Debug, Deserialize)]
struct TokenData {
    #[serde(rename = "sessionKey", default)]
    session_key: Option<String>,
    #[serde(rename = "activePersonas", default)]
    active_personas: HashMap<String, ActivePersona>,
}

#[derive(Debug, Deserialize)]
struct ActivePersona {
    #[serde(rename = "personaId", default, deserialize_with = "deserialize_string_or_number")]
    persona_id: Option<String>,
}

impl TokenResponse {
    /// The server signals a rejected login with `success: 0`.
    fn is_rejected(&self) -> bool {
        match &self.success {
            serde_json::Value::Number(n) => n.as_i64() == Some(0),
            serde_json::Value::Bool(b) => !b,
            _ => false,
        }
    }

    fn into_session(self) -> Result<Session, ApiError> {
        if self.is_rejected() {
            let message = self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AUTH_ERROR.to_string());
            return Err(ApiError::Auth(message));
        }

        let data = self
            .data
            .ok_or_else(|| ApiError::InvalidResponse("Token response has no data".to_string()))?;

        let session_key = data
            .session_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ApiError::InvalidResponse("Token response has no session key".to_string()))?;

        let persona_id = data
            .active_personas
            .get(GAME_ID)
            .and_then(|p| p.persona_id.clone())
            .ok_or_else(|| {
                ApiError::InvalidResponse("Account has no active Battlefield 4 persona".to_string())
            })?;

        Ok(Session::new(session_key, persona_id))
    }
}

// ============================================================================
// Request bodies
// ============================================================================

fn timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Form body of the token exchange.
fn token_form(credentials: &Credentials, timestamp: i64) -> Vec<(&'static str, String)> {
    vec![
        ("email", credentials.email().to_string()),
        ("password", credentials.password().to_string()),
        ("clientId", String::new()),
        ("pushId", String::new()),
        ("bundleId", BUNDLE_ID.to_string()),
        ("bundleVersion", BUNDLE_VERSION.to_string()),
        ("deviceName", "Nexus7".to_string()),
        ("deviceLanguage", "en".to_string()),
        ("deviceTimezone", "8".to_string()),
        ("deviceType", "1".to_string()),
        ("deviceOS", "2".to_string()),
        ("timestamp", timestamp.to_string()),
    ]
}

/// Form body shared by the pack endpoints; `pack` is set only when opening.
fn pack_form(session: &Session, pack: Option<&Battlepack>, timestamp: i64) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("game", GAME_ID.to_string()),
        ("personaId", session.persona_id().to_string()),
        ("platform", PLATFORM_ID.to_string()),
    ];
    if let Some(pack) = pack {
        form.push(("packId", pack.id.clone()));
    }
    form.push(("timestamp", timestamp.to_string()));
    form
}

fn default_headers() -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();
    headers.insert("x-bundle-version", header::HeaderValue::from_static(BUNDLE_VERSION));
    headers.insert("x-app-version", header::HeaderValue::from_static(APP_VERSION));
    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));
    headers.insert(header::ORIGIN, header::HeaderValue::from_static("file://"));
    headers.insert("x-requested-with", header::HeaderValue::from_static(BUNDLE_ID));
    headers.insert(header::ACCEPT_LANGUAGE, header::HeaderValue::from_static("en-US"));
    headers
}

// ============================================================================
// Client
// ============================================================================

/// HTTP client for Battlelog.
/// Clone is cheap - reqwest::Client uses Arc internally, so clones share the
/// connection pool and the cookie jar holding the Battlelog session cookie.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .default_headers(default_headers())
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn session_header(session: &Session) -> Result<header::HeaderValue, ApiError> {
        header::HeaderValue::from_str(session.session_id())
            .map_err(|_| ApiError::InvalidResponse("Session key is not a valid header value".to_string()))
    }
}

#[async_trait]
impl BattlelogService for ApiClient {
    /// Exchange credentials for a session key and the BF4 persona id
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let url = self.url("/mobile/gettoken");

        let response = self
            .client
            .post(&url)
            .form(&token_form(credentials, timestamp_millis()))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(status = %status, "Token response received");

        if !status.is_success() {
            return Err(ApiError::from_status(status, &text));
        }

        let parsed: TokenResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse token response: {}", e)))?;

        let session = parsed.into_session()?;
        debug!(persona_id = %session.persona_id(), "Authenticated");
        Ok(session)
    }

    /// Fetch every battlepack for the persona.
    /// The endpoint expects a GET with a form-encoded body.
    async fn fetch_battlepacks(&self, session: &Session) -> Result<Vec<BattlepackRecord>, ApiError> {
        let url = self.url("/bf4/mobile/getbattlepacks");

        let response = self
            .client
            .get(&url)
            .header(SESSION_HEADER, Self::session_header(session)?)
            .form(&pack_form(session, None, timestamp_millis()))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(status = %status, "Battlepacks response received");

        if !status.is_success() {
            return Err(ApiError::from_status(status, &text));
        }

        let parsed: BattlepacksResponse = serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse battlepacks response: {}", e))
        })?;

        Ok(parsed.into_packs())
    }

    async fn open_battlepack(&self, session: &Session, pack: &Battlepack) -> Result<(), OpenFailure> {
        let url = self.url("/bf4/mobile/openbattlepack");

        let session_header = Self::session_header(session)
            .map_err(|e| OpenFailure::Transport(e.to_string()))?;

        let response = self
            .client
            .post(&url)
            .header(SESSION_HEADER, session_header)
            .form(&pack_form(session, Some(pack), timestamp_millis()))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            Ok(())
        } else {
            warn!(pack_id = %pack.id, status = %status, "Open request rejected");
            Err(OpenFailure::Status(status.as_u16()))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

//! In-memory `BattlelogService` used by the unit tests.
//!
//! Holds one account, a list of pack records, and per-pack failure and delay
//! settings. Opening a pack marks its record as opened, like the real server.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{ApiError, BattlelogService};
use crate::auth::{Credentials, Session};
use crate::models::{Battlepack, BattlepackRecord, OpenFailure};

pub const EMAIL: &str = "soldier@example.com";
pub const PASSWORD: &str = "hunter2";

pub struct FakeService {
    records: Mutex<Vec<BattlepackRecord>>,
    failures: HashMap<String, OpenFailure>,
    delays: HashMap<String, Duration>,
    fail_listing: bool,
    pub auth_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub open_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            failures: HashMap::new(),
            delays: HashMap::new(),
            fail_listing: false,
            auth_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            open_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_pack(self, id: &str, opened_at: i64) -> Self {
        self.records.lock().unwrap().push(BattlepackRecord {
            pack_id: Some(id.to_string()),
            opened_at: Some(opened_at),
        });
        self
    }

    pub fn with_failure(mut self, id: &str, failure: OpenFailure) -> Self {
        self.failures.insert(id.to_string(), failure);
        self
    }

    pub fn with_delay(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_string(), delay);
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn credentials() -> Credentials {
        Credentials::new(EMAIL, PASSWORD).unwrap()
    }
}

#[async_trait]
impl BattlelogService for FakeService {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        if credentials.email() == EMAIL && credentials.password() == PASSWORD {
            Ok(Session::new("w2m9", "2741"))
        } else {
            Err(ApiError::Auth("The e-mail or password you entered is invalid.".to_string()))
        }
    }

    async fn fetch_battlepacks(&self, _session: &Session) -> Result<Vec<BattlepackRecord>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            return Err(ApiError::ServerError("listing unavailable".to_string()));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn open_battlepack(&self, _session: &Session, pack: &Battlepack) -> Result<(), OpenFailure> {
        self.open_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        match self.delays.get(&pack.id) {
            Some(delay) => tokio::time::sleep(*delay).await,
            None => tokio::task::yield_now().await,
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(failure) = self.failures.get(&pack.id) {
            return Err(failure.clone());
        }

        let mut records = self.records.lock().unwrap();
        for record in records.iter_mut().filter(|r| r.pack_id.as_deref() == Some(pack.id.as_str())) {
            record.opened_at = Some(1_419_811_200);
        }
        Ok(())
    }
}

//! Battlepack models.
//!
//! The listing endpoint returns a rich record per pack (items, rarity,
//! timestamps). Only the id and the opened marker are kept; everything else
//! is dropped at deserialization.

use std::fmt;

use serde::{Deserialize, Serialize};

use tracing::debug;

use super::{deserialize_lenient_i64, deserialize_string_or_number};

/// `openedAt` value the server uses for packs that have not been opened.
pub const UNOPENED_SENTINEL: i64 = 0;

/// Envelope of the `getbattlepacks` response: `{ "data": { "packs": [...] } }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BattlepacksResponse {
    #[serde(default)]
    pub data: Option<BattlepacksData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BattlepacksData {
    #[serde(default, deserialize_with = "deserialize_records")]
    pub packs: Vec<BattlepackRecord>,
}

// A record that does not fit `BattlepackRecord` is dropped on its own
// instead of failing the whole listing.
fn deserialize_records<'de, D>(deserializer: D) -> Result<Vec<BattlepackRecord>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(error = %e, "Skipping malformed battlepack record");
                None
            }
        })
        .collect())
}

impl BattlepacksResponse {
    pub fn into_packs(self) -> Vec<BattlepackRecord> {
        self.data.map(|d| d.packs).unwrap_or_default()
    }
}

/// One battlepack as listed by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattlepackRecord {
    #[serde(rename = "packId", default, deserialize_with = "deserialize_string_or_number")]
    pub pack_id: Option<String>,
    #[serde(rename = "openedAt", default, deserialize_with = "deserialize_lenient_i64")]
    pub opened_at: Option<i64>,
}

impl BattlepackRecord {
    pub fn is_unopened(&self) -> bool {
        self.opened_at == Some(UNOPENED_SENTINEL)
    }

    /// Project to the id-only view, if the record carries an id.
    pub fn to_battlepack(&self) -> Option<Battlepack> {
        self.pack_id.as_deref().map(Battlepack::new)
    }
}

/// A battlepack reduced to the identifier needed to open it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Battlepack {
    pub id: String,
}

impl Battlepack {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl fmt::Display for Battlepack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "battlepack {}", self.id)
    }
}

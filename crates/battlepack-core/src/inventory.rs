//! Listing of unopened battlepacks.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::api::{ApiError, BattlelogService};
use crate::auth::Session;
use crate::models::{Battlepack, BattlepackRecord};

/// Fetch the persona's battlepacks and keep the unopened ones.
/// An account with nothing to open yields an empty list, not an error.
pub async fn list_unopened<S>(service: &S, session: &Session) -> Result<Vec<Battlepack>, ApiError>
where
    S: BattlelogService + ?Sized,
{
    let records = service.fetch_battlepacks(session).await?;
    let unopened = filter_unopened(&records);
    info!(total = records.len(), unopened = unopened.len(), "Battlepacks listed");
    Ok(unopened)
}

/// Keep records whose `openedAt` is the unopened sentinel, projected to ids.
/// Records without an id are skipped, and each id is kept once.
pub fn filter_unopened(records: &[BattlepackRecord]) -> Vec<Battlepack> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|record| record.is_unopened())
        .filter_map(|record| {
            let pack = record.to_battlepack();
            if pack.is_none() {
                debug!("Skipping unopened battlepack without an id");
            }
            pack
        })
        .filter(|pack| seen.insert(pack.id.clone()))
        .collect()
}

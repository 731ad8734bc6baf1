use std::fmt;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::api::BattlelogService;
use crate::auth::Session;
use crate::models::{Battlepack, OpenOutcome};

/// Upper bound on open requests in flight at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConcurrencyLimit {
    /// Issue every request at once.
    #[default]
    Unbounded,
    /// Keep at most this many requests in flight (sliding window).
    Bounded(usize),
}

impl From<Option<usize>> for ConcurrencyLimit {
    /// `None` and `Some(0)` both mean no cap.
    fn from(value: Option<usize>) -> Self {
        match value {
            None | Some(0) => ConcurrencyLimit::Unbounded,
            Some(n) => ConcurrencyLimit::Bounded(n),
        }
    }
}

impl fmt::Display for ConcurrencyLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcurrencyLimit::Unbounded => write!(f, "unbounded"),
            ConcurrencyLimit::Bounded(n) => write!(f, "{}", n),
        }
    }
}

/// Open every pack and return one outcome per pack, in completion order.
///
/// Requests are independent: a failed or slow request never cancels or
/// delays the others, and this only returns once every request has settled.
/// An empty `packs` slice makes no calls at all.
pub async fn open_all<S>(
    service: &S,
    session: &Session,
    packs: &[Battlepack],
    limit: ConcurrencyLimit,
) -> Vec<OpenOutcome>
where
    S: BattlelogService + ?Sized,
{
    if packs.is_empty() {
        debug!("No battlepacks to open");
        return Vec::new();
    }

    info!(count = packs.len(), limit = %limit, "Opening battlepacks");

    let requests = packs.iter().map(|pack| open_one(service, session, pack));

    let outcomes: Vec<OpenOutcome> = match limit {
        ConcurrencyLimit::Unbounded => futures::future::join_all(requests).await,
        ConcurrencyLimit::Bounded(max) => {
            stream::iter(requests).buffer_unordered(max.max(1)).collect().await
        }
    };

    debug!(settled = outcomes.len(), "All open requests settled");
    outcomes
}

async fn open_one<S>(service: &S, session: &Session, pack: &Battlepack) -> OpenOutcome
where
    S: BattlelogService + ?Sized,
{
    let result = service.open_battlepack(session, pack).await;
    match &result {
        Ok(()) => debug!(pack_id = %pack.id, "Battlepack opened"),
        Err(failure) => warn!(pack_id = %pack.id, error = %failure, "Failed to open battlepack"),
    }
    OpenOutcome::from((pack.clone(), result))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use super::*;
    use crate::batch::summarize;
    use crate::models::OpenFailure;
    use crate::testing::FakeService;

    fn packs(ids: &[&str]) -> Vec<Battlepack> {
        ids.iter().map(|id| Battlepack::new(*id)).collect()
    }

    fn session() -> Session {
        Session::new("w2m9", "2741")
    }

    #[test]
    fn test_limit_from_option() {
        assert_eq!(ConcurrencyLimit::from(None), ConcurrencyLimit::Unbounded);
        assert_eq!(ConcurrencyLimit::from(Some(0)), ConcurrencyLimit::Unbounded);
        assert_eq!(ConcurrencyLimit::from(Some(3)), ConcurrencyLimit::Bounded(3));
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let service = FakeService::new();
        let outcomes = open_all(&service, &session(), &[], ConcurrencyLimit::Unbounded).await;

        assert!(outcomes.is_empty());
        assert_eq!(service.open_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_affect_others() {
        // Pack 2 fails fast while pack 1 is still in flight, so outcomes
        // arrive out of input order.
        let service = FakeService::new()
            .with_delay("1", Duration::from_millis(40))
            .with_delay("2", Duration::from_millis(5))
            .with_failure("2", OpenFailure::Transport("connection reset".to_string()));

        for limit in [ConcurrencyLimit::Unbounded, ConcurrencyLimit::Bounded(3)] {
            let outcomes = open_all(&service, &session(), &packs(&["1", "2", "3"]), limit).await;
            assert_eq!(outcomes.len(), 3);

            let status_of = |id: &str| {
                outcomes
                    .iter()
                    .find(|o| o.battlepack.id == id)
                    .map(|o| o.is_success())
                    .unwrap()
            };
            assert!(status_of("1"));
            assert!(!status_of("2"));
            assert!(status_of("3"));

            let summary = summarize(&outcomes);
            assert_eq!(summary.succeeded, 2);
            assert_eq!(summary.failed, 1);
        }
    }

    #[tokio::test]
    async fn test_every_pack_gets_exactly_one_outcome() {
        let ids: Vec<String> = (1..=25).map(|i| i.to_string()).collect();
        let input: Vec<Battlepack> = ids.iter().map(Battlepack::new).collect();

        let mut service = FakeService::new();
        for id in ids.iter().filter(|id| id.ends_with('3')) {
            service = service.with_failure(id, OpenFailure::Status(500));
        }

        let outcomes = open_all(&service, &session(), &input, ConcurrencyLimit::Bounded(4)).await;

        let mut seen: Vec<&str> = outcomes.iter().map(|o| o.battlepack.id.as_str()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), input.len());
        assert_eq!(service.open_calls.load(Ordering::SeqCst), input.len());

        let summary = summarize(&outcomes);
        assert_eq!(summary.total(), input.len());
        assert_eq!(summary.failed, 3); // 3, 13, 23
    }

    #[tokio::test]
    async fn test_all_failing_still_settles() {
        let service = FakeService::new()
            .with_failure("1", OpenFailure::Status(403))
            .with_failure("2", OpenFailure::Status(502));

        let outcomes = open_all(&service, &session(), &packs(&["1", "2"]), ConcurrencyLimit::Unbounded).await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| !o.is_success()));
    }

    #[tokio::test]
    async fn test_unbounded_runs_all_concurrently() {
        let ids = ["1", "2", "3", "4", "5", "6"];
        let mut service = FakeService::new();
        for id in ids {
            service = service.with_delay(id, Duration::from_millis(20));
        }

        open_all(&service, &session(), &packs(&ids), ConcurrencyLimit::Unbounded).await;

        assert_eq!(service.max_in_flight.load(Ordering::SeqCst), ids.len());
    }

    #[tokio::test]
    async fn test_bounded_never_exceeds_limit() {
        let ids = ["1", "2", "3", "4", "5", "6", "7"];
        let mut service = FakeService::new();
        for id in ids {
            service = service.with_delay(id, Duration::from_millis(10));
        }

        let outcomes = open_all(&service, &session(), &packs(&ids), ConcurrencyLimit::Bounded(2)).await;

        assert_eq!(outcomes.len(), ids.len());
        assert_eq!(service.max_in_flight.load(Ordering::SeqCst), 2);
    }
}

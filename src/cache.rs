//! Time-bounded cache for fetch cycle results
//!
//! The cache is an explicit object owned by the caller, not ambient process
//! state: the presentation layer holds one `TableCache`, routes every read
//! through `get_or_fetch`, and maps its refresh signal to `invalidate`.

use crate::error::TempMapError;
use crate::fetcher::FetchOutcome;
use crate::models::WeatherTable;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Default validity window for a fetch cycle result, in seconds
pub const DEFAULT_TTL_SECONDS: i64 = 600;

/// Caller-owned TTL cache for the result of one full fetch cycle.
///
/// Single-threaded, single writer: a read either returns the cached table
/// or runs exactly one new synchronous fetch cycle. There is no partial
/// invalidation per location; the table is replaced wholesale.
pub struct TableCache {
    entry: Option<WeatherTable>,
    ttl: Duration,
}

impl TableCache {
    /// Create an empty cache with the given validity window
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { entry: None, ttl }
    }

    /// Create an empty cache with the default 600-second window
    #[must_use]
    pub fn with_default_ttl() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECONDS))
    }

    /// Return the cached table if it is still fresh at `now`, otherwise run
    /// `fetch` and cache its table stamped with `now`.
    ///
    /// Failures are per-cycle notifications: they are returned only for the
    /// cycle that produced them, never replayed on cache hits.
    pub fn get_or_fetch<F>(
        &mut self,
        now: DateTime<Utc>,
        fetch: F,
    ) -> (WeatherTable, Vec<TempMapError>)
    where
        F: FnOnce() -> FetchOutcome,
    {
        if let Some(table) = &self.entry {
            if table.is_fresh(now, self.ttl) {
                debug!("Returning cached weather table");
                return (table.clone(), Vec::new());
            }
            debug!("Cached weather table expired");
        }

        let FetchOutcome { mut table, failures } = fetch();
        table.retrieved_at = now;
        self.entry = Some(table.clone());
        (table, failures)
    }

    /// Drop the cached table so the next read runs a fresh fetch cycle
    /// regardless of elapsed time (the presentation layer's refresh signal).
    pub fn invalidate(&mut self) {
        debug!("Weather table cache invalidated");
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherSample;
    use chrono::TimeZone;
    use std::cell::Cell;

    fn outcome(temperature: f64) -> FetchOutcome {
        FetchOutcome {
            table: WeatherTable::new(vec![WeatherSample {
                location_name: "Fukuoka".to_string(),
                latitude: 33.5904,
                longitude: 130.4017,
                current_temperature: temperature,
                hourly_times: vec!["2026-08-23T00:00".to_string()],
                hourly_temperatures: vec![temperature],
            }]),
            failures: Vec::new(),
        }
    }

    #[test]
    fn test_hit_within_ttl_does_not_refetch() {
        let mut cache = TableCache::new(Duration::seconds(600));
        let calls = Cell::new(0);
        let t0 = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();

        let (first, _) = cache.get_or_fetch(t0, || {
            calls.set(calls.get() + 1);
            outcome(18.0)
        });
        let (second, failures) = cache.get_or_fetch(t0 + Duration::seconds(599), || {
            calls.set(calls.get() + 1);
            outcome(99.0)
        });

        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
        assert!(failures.is_empty());
    }

    #[test]
    fn test_expired_entry_refetches() {
        let mut cache = TableCache::new(Duration::seconds(600));
        let calls = Cell::new(0);
        let t0 = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();

        cache.get_or_fetch(t0, || {
            calls.set(calls.get() + 1);
            outcome(18.0)
        });
        let (table, _) = cache.get_or_fetch(t0 + Duration::seconds(600), || {
            calls.set(calls.get() + 1);
            outcome(21.0)
        });

        assert_eq!(calls.get(), 2);
        assert_eq!(table.samples[0].current_temperature, 21.0);
    }

    #[test]
    fn test_invalidate_forces_refetch() {
        let mut cache = TableCache::with_default_ttl();
        let calls = Cell::new(0);
        let t0 = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();

        cache.get_or_fetch(t0, || {
            calls.set(calls.get() + 1);
            outcome(18.0)
        });
        cache.invalidate();
        let (table, _) = cache.get_or_fetch(t0 + Duration::seconds(1), || {
            calls.set(calls.get() + 1);
            outcome(19.5)
        });

        assert_eq!(calls.get(), 2);
        assert_eq!(table.samples[0].current_temperature, 19.5);
    }

    #[test]
    fn test_failures_surfaced_only_for_their_cycle() {
        let mut cache = TableCache::new(Duration::seconds(600));
        let t0 = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();

        let (_, failures) = cache.get_or_fetch(t0, || FetchOutcome {
            table: WeatherTable::new(Vec::new()),
            failures: vec![TempMapError::network("Saga", "timeout")],
        });
        assert_eq!(failures.len(), 1);

        // Cache hit returns the (empty) table again but no stale notifications
        let (table, failures) = cache.get_or_fetch(t0 + Duration::seconds(10), || {
            panic!("must not refetch within the window")
        });
        assert!(table.is_empty());
        assert!(failures.is_empty());
    }
}

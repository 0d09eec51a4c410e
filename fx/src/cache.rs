//! Tiered rate resolution: memory slot, fresh fetch, persisted record,
//! static defaults.
//!
//! Resolution is total: `get_rates` never fails and never returns an empty
//! table, whichever tier ends up answering.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use stayline_common::RateTable;
use tracing::{debug, info, warn};

use crate::default_rates::default_rate_table;
use crate::provider::FallbackRateSource;
use crate::store::{PersistedRates, RateStore};

/// One resolved rate table with its fetch time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// USD-relative rates.
    pub rates: RateTable,
    /// When the originating fetch happened.
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry stamped with the current time.
    pub fn new(rates: RateTable) -> Self {
        Self {
            rates,
            fetched_at: Utc::now(),
        }
    }

    /// Age of the entry relative to now.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.fetched_at)
    }

    fn is_fresh(&self, config: &RateCacheConfig) -> bool {
        self.age() < config.fresh_ttl
    }
}

/// Configuration for the tiered cache.
#[derive(Debug, Clone)]
pub struct RateCacheConfig {
    /// Window in which an in-memory entry is served with zero I/O.
    pub fresh_ttl: Duration,
    /// Window in which a persisted record may still be adopted.
    pub stale_ttl: Duration,
}

impl Default for RateCacheConfig {
    fn default() -> Self {
        Self {
            fresh_ttl: Duration::hours(1),
            stale_ttl: Duration::hours(24),
        }
    }
}

/// Tiered rate resolver with one in-memory slot.
///
/// Concurrent misses may each trigger a redundant fetch; results are
/// idempotent and convergent, so the slot is a plain last-writer-wins
/// overwrite with no single-flight deduplication.
pub struct TieredRateCache {
    source: FallbackRateSource,
    store: Arc<dyn RateStore>,
    entry: RwLock<Option<CacheEntry>>,
    config: RateCacheConfig,
}

impl TieredRateCache {
    /// Create a cache with the default TTLs.
    pub fn new(source: FallbackRateSource, store: Arc<dyn RateStore>) -> Self {
        Self::with_config(source, store, RateCacheConfig::default())
    }

    /// Create a cache with custom TTLs.
    pub fn with_config(
        source: FallbackRateSource,
        store: Arc<dyn RateStore>,
        config: RateCacheConfig,
    ) -> Self {
        Self {
            source,
            store,
            entry: RwLock::new(None),
            config,
        }
    }

    /// Resolve a usable rate table.
    ///
    /// Tier order: fresh memory entry, fresh fetch, persisted record under
    /// the stale window, static defaults. Total: always answers with a
    /// non-empty table.
    pub async fn get_rates(&self) -> RateTable {
        if let Some(entry) = self.fresh_entry() {
            debug!(age_ms = entry.age().num_milliseconds(), "Serving in-memory rates");
            return entry.rates;
        }

        match self.source.resolve_fresh_rates().await {
            Ok(rates) => {
                let entry = CacheEntry::new(rates.clone());
                let record = PersistedRates::new(rates.clone(), entry.fetched_at);
                *self.entry.write() = Some(entry);
                self.store.save(&record).await;
                info!(currencies = rates.len(), "Adopted fresh rate table");
                rates
            }
            Err(_) => self.resolve_degraded().await,
        }
    }

    fn fresh_entry(&self) -> Option<CacheEntry> {
        let guard = self.entry.read();
        guard.as_ref().filter(|e| e.is_fresh(&self.config)).cloned()
    }

    /// All providers failed: fall back to the persisted record, then to the
    /// static defaults.
    async fn resolve_degraded(&self) -> RateTable {
        if let Some(record) = self.store.load().await {
            let fetched_at = record.fetched_at();
            let age = Utc::now().signed_duration_since(fetched_at);

            // A tampered or truncated store file can decode cleanly while
            // carrying nothing usable; that counts as no record at all.
            match record.rates.sanitize() {
                Some(rates) if age < self.config.stale_ttl => {
                    warn!(
                        age_ms = age.num_milliseconds(),
                        "All providers down, adopting persisted rates"
                    );
                    // The original timestamp is kept: the entry stays as
                    // stale as its fetch actually was.
                    *self.entry.write() = Some(CacheEntry {
                        rates: rates.clone(),
                        fetched_at,
                    });
                    return rates;
                }
                Some(_) => {
                    warn!(age_ms = age.num_milliseconds(), "Persisted rates expired, discarding");
                }
                None => {
                    warn!("Persisted rates unusable, discarding");
                }
            }
        }

        warn!("No usable rate source, falling back to static defaults");
        // The default table is a placeholder, not an observation: it is
        // never written to the slot or the store.
        default_rate_table()
    }
}

//! Best-effort durable persistence for fetched rate tables.
//!
//! One namespaced key holds a JSON record of the last successful fetch so a
//! restart keeps a usable table across provider outages. Storage failures
//! never abort the resolution flow: a missing or malformed record is simply
//! "no persisted record".

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use stayline_common::RateTable;
use tracing::warn;

use crate::error::StoreError;

/// File name of the single persisted record.
pub const STORE_FILE_NAME: &str = "stayline_fx_rates.json";

/// The serialized form of a cache entry. Unversioned; the schema is assumed
/// stable across releases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRates {
    /// USD-relative rates as fetched.
    pub rates: RateTable,
    /// Epoch milliseconds of the originating fetch.
    pub timestamp: i64,
}

impl PersistedRates {
    /// Create a record from a fetched table and its fetch time.
    pub fn new(rates: RateTable, fetched_at: DateTime<Utc>) -> Self {
        Self {
            rates,
            timestamp: fetched_at.timestamp_millis(),
        }
    }

    /// Fetch time of the record. A garbage timestamp maps to the distant
    /// past so the record classifies as expired.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Durable storage for the one persisted rate record.
///
/// Both operations are best-effort: failures are logged and swallowed.
#[async_trait]
pub trait RateStore: Send + Sync {
    /// Read the persisted record, if a usable one exists.
    async fn load(&self) -> Option<PersistedRates>;

    /// Persist the record, overwriting any previous one.
    async fn save(&self, record: &PersistedRates);
}

/// File-backed store writing one JSON file under a configured directory.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store under the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(STORE_FILE_NAME),
        }
    }

    async fn try_load(&self) -> Result<PersistedRates, StoreError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn try_save(&self, record: &PersistedRates) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(record)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl RateStore for JsonFileStore {
    async fn load(&self) -> Option<PersistedRates> {
        match self.try_load().await {
            Ok(record) => Some(record),
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read persisted rates");
                None
            }
        }
    }

    async fn save(&self, record: &PersistedRates) {
        if let Err(e) = self.try_save(record).await {
            warn!(path = %self.path.display(), error = %e, "Failed to persist rates");
        }
    }
}

/// In-process store for tests and deployments that opt out of persistence.
#[derive(Default)]
pub struct MemoryStore {
    record: Mutex<Option<PersistedRates>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a record.
    pub fn seeded(record: PersistedRates) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }
}

#[async_trait]
impl RateStore for MemoryStore {
    async fn load(&self) -> Option<PersistedRates> {
        self.record.lock().clone()
    }

    async fn save(&self, record: &PersistedRates) {
        *self.record.lock() = Some(record.clone());
    }
}

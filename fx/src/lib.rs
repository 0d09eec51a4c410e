//! Stayline FX Engine
//!
//! Exchange-rate resolution and currency conversion for displaying rents,
//! payments, and plan prices in a viewer's local currency, despite
//! unreliable third-party rate providers.
//!
//! # Features
//!
//! - Ordered provider fallback chain, first parseable answer wins
//! - Tiered cache: fresh memory entry, fresh fetch, persisted record,
//!   static defaults
//! - USD-pivot conversion with lenient lookup for unsupported codes
//! - Locale-aware formatting with a symbol-table fallback
//!
//! The outward contract is total: resolution, conversion, and formatting
//! never fail. Every failure inside the subsystem has a defined
//! degraded-but-functional fallback, logged but never surfaced.
//!
//! This is a display convenience layer, not a financial ledger: it makes no
//! accuracy guarantee and carries no accounting-grade precision.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stayline_common::Currency;
//! use stayline_fx::{
//!     FallbackRateSource, FxEngine, FxEngineConfig, HttpRateProvider,
//!     JsonFileStore, ProviderConfig,
//! };
//!
//! let providers = vec![
//!     Arc::new(HttpRateProvider::new(ProviderConfig::new(
//!         "open-er-api",
//!         "https://open.er-api.com/v6/latest/USD",
//!     ))?) as Arc<dyn stayline_fx::RateProvider>,
//! ];
//! let engine = FxEngine::new(
//!     FallbackRateSource::new(providers),
//!     Arc::new(JsonFileStore::new("/var/lib/stayline")),
//!     FxEngineConfig::default(),
//! );
//!
//! let rent = engine.convert(1200.0, &Currency::usd(), &Currency::eur()).await;
//! let display = engine.format(rent, &Currency::eur(), Some("de-DE"));
//! ```

pub mod cache;
pub mod conversion;
pub mod default_rates;
pub mod engine;
pub mod error;
pub mod format;
pub mod provider;
pub mod store;

pub use cache::{CacheEntry, RateCacheConfig, TieredRateCache};
pub use conversion::convert;
pub use default_rates::default_rate_table;
pub use engine::{FxEngine, FxEngineConfig};
pub use error::{FetchExhausted, FormatError, ProviderError, StoreError};
pub use format::format;
pub use provider::{FallbackRateSource, HttpRateProvider, ProviderConfig, RateProvider};
pub use store::{JsonFileStore, MemoryStore, PersistedRates, RateStore};

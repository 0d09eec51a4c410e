//! Consumer facade over resolution, conversion, and formatting.
//!
//! Display code calls only `convert` and `format`; the fallback chain stays
//! an implementation detail behind a total, non-failing interface. The
//! engine is constructed once per process and injected into call sites, so
//! tests can swap in fakes and assert tier transitions deterministically.

use std::sync::Arc;

use stayline_common::{Currency, RateTable};
use tracing::instrument;

use crate::cache::{RateCacheConfig, TieredRateCache};
use crate::conversion;
use crate::format;
use crate::provider::FallbackRateSource;
use crate::store::RateStore;

/// Configuration for the FX engine.
#[derive(Debug, Clone)]
pub struct FxEngineConfig {
    /// Cache configuration.
    pub cache: RateCacheConfig,
    /// Locale used when the caller supplies none.
    pub default_locale: String,
}

impl Default for FxEngineConfig {
    fn default() -> Self {
        Self {
            cache: RateCacheConfig::default(),
            default_locale: format::DEFAULT_LOCALE.to_string(),
        }
    }
}

/// The main FX engine.
pub struct FxEngine {
    cache: TieredRateCache,
    default_locale: String,
}

impl FxEngine {
    /// Create an engine over a provider chain and a durable store.
    pub fn new(source: FallbackRateSource, store: Arc<dyn RateStore>, config: FxEngineConfig) -> Self {
        Self {
            cache: TieredRateCache::with_config(source, store, config.cache),
            default_locale: config.default_locale,
        }
    }

    /// Resolve the current rate table. Total: always answers.
    pub async fn rates(&self) -> RateTable {
        self.cache.get_rates().await
    }

    /// Convert an amount for display. Total: degraded tiers still answer.
    #[instrument(skip(self), fields(from = %from, to = %to))]
    pub async fn convert(&self, amount: f64, from: &Currency, to: &Currency) -> f64 {
        let rates = self.cache.get_rates().await;
        conversion::convert(amount, from, to, &rates)
    }

    /// Format an amount for display. Never fails.
    pub fn format(&self, amount: f64, currency: &Currency, locale: Option<&str>) -> String {
        format::format(amount, currency, locale.or(Some(self.default_locale.as_str())))
    }

    /// Convert into the viewer's currency and format in one call.
    pub async fn convert_and_format(
        &self,
        amount: f64,
        from: &Currency,
        to: &Currency,
        locale: Option<&str>,
    ) -> String {
        let converted = self.convert(amount, from, to).await;
        self.format(converted, to, locale)
    }
}

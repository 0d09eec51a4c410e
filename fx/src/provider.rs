//! Rate provider trait and the ordered fallback chain.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use stayline_common::RateTable;
use tracing::{debug, warn};

use crate::error::{FetchExhausted, ProviderError, ProviderResult};

/// Default bound on a single provider request, so one unresponsive endpoint
/// cannot stall the whole chain.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Trait for external rate providers.
///
/// Fetch-only: implementations never touch the cache.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Fetch a fresh USD-relative rate table.
    async fn fetch_rates(&self) -> ProviderResult<RateTable>;
}

/// Wire shape shared by the supported rate endpoints: a JSON object with a
/// `rates` map of currency code to rate per 1 USD.
#[derive(Debug, Deserialize)]
struct RatesBody {
    rates: HashMap<String, f64>,
}

impl RatesBody {
    fn into_table(self) -> ProviderResult<RateTable> {
        RateTable::from_map(self.rates).ok_or(ProviderError::EmptyTable)
    }
}

/// Configuration for one HTTP rate endpoint.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider name used in logs.
    pub name: String,
    /// Endpoint URL, answered with a GET.
    pub url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Create a config with the default timeout.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A rate provider backed by one external HTTP endpoint.
pub struct HttpRateProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl HttpRateProvider {
    /// Create a provider for the given endpoint.
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ProviderError::Http)?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn fetch_rates(&self) -> ProviderResult<RateTable> {
        let response = self.client.get(&self.config.url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(self.config.timeout)
            } else {
                ProviderError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::BadStatus(status.as_u16()));
        }

        let body: RatesBody = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedBody(e.to_string()))?;

        body.into_table()
    }
}

/// Ordered chain of providers, first parseable success wins.
///
/// No cross-provider reconciliation: consistency is traded for latency and
/// simplicity.
pub struct FallbackRateSource {
    providers: Vec<Arc<dyn RateProvider>>,
}

impl FallbackRateSource {
    /// Create a chain from providers in priority order.
    pub fn new(providers: Vec<Arc<dyn RateProvider>>) -> Self {
        Self { providers }
    }

    /// Try each provider in order and return the first table that parses.
    ///
    /// Each failure is logged and skipped; all failed means `FetchExhausted`.
    pub async fn resolve_fresh_rates(&self) -> Result<RateTable, FetchExhausted> {
        for provider in &self.providers {
            match provider.fetch_rates().await {
                Ok(table) => {
                    debug!(
                        provider = provider.name(),
                        currencies = table.len(),
                        "Fetched fresh rates"
                    );
                    return Ok(table);
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "Rate provider failed, trying next"
                    );
                }
            }
        }

        Err(FetchExhausted)
    }
}

/// Mock rate provider for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockRateProvider {
    name: String,
    table: Option<RateTable>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockRateProvider {
    /// A provider that always answers with the given table.
    pub fn succeeding(name: impl Into<String>, table: RateTable) -> Self {
        Self {
            name: name.into(),
            table: Some(table),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// A provider that always fails.
    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// How many times `fetch_rates` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RateProvider for MockRateProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_rates(&self) -> ProviderResult<RateTable> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.table.clone().ok_or(ProviderError::EmptyTable)
    }
}

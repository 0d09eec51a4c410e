//! FX engine error types.
//!
//! Nothing in this taxonomy ever reaches a consumer: every failure has a
//! defined degraded-but-functional fallback further up the chain.

use thiserror::Error;

/// A single rate endpoint failed. Recoverable: the chain tries the next one.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (connection refused, DNS, TLS).
    #[error("request failed: {0}")]
    Http(reqwest::Error),

    /// The endpoint answered outside the 2xx range.
    #[error("unexpected status {0}")]
    BadStatus(u16),

    /// The body was not JSON with a `rates` object of code -> number.
    #[error("malformed rate body: {0}")]
    MalformedBody(String),

    /// The endpoint answered but carried no usable rates.
    #[error("provider returned an empty rate table")]
    EmptyTable,

    /// The bounded per-provider request window elapsed.
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Every configured provider failed. Recoverable via the persisted record
/// or the static default table.
#[derive(Debug, Error)]
#[error("all rate providers failed")]
pub struct FetchExhausted;

/// Durable storage failed. Always logged and ignored, never fatal.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed persisted record: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Locale formatting was unavailable. Recovered via the symbol table.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("no display pattern for locale {0:?}")]
    UnknownLocale(String),

    #[error("no display symbol for currency {0}")]
    UnknownCurrency(String),
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

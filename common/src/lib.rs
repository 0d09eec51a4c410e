//! Stayline Common Types
//!
//! Shared currency types used across Stayline services: ISO currency codes
//! with display metadata, and USD-relative exchange rate tables.

pub mod currency;
pub mod rates;

pub use currency::*;
pub use rates::*;

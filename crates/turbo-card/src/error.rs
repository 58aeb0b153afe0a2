//! Card error types.

use thiserror::Error;

/// Errors returned from the card's programmatic API.
///
/// User interaction never produces these: the selector only offers listed
/// variants and disabled actions are suppressed, not failed.
#[derive(Error, Debug)]
pub enum CardError {
    /// Variant not present in the bound listing.
    #[error("Variant not found: {0}")]
    UnknownVariant(String),

    /// Variant exists but the configured policy refuses it.
    #[error("Variant unavailable: {0}")]
    VariantUnavailable(String),

    /// Listing data violates an invariant.
    #[error("Invalid listing: {0}")]
    InvalidListing(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CardError {
    fn from(e: serde_json::Error) -> Self {
        CardError::SerializationError(e.to_string())
    }
}

/// Reasons the locale-aware price formatter could not produce a label.
///
/// These are recovered inside the card by switching to the fixed fallback
/// label; they never reach the caller of `ProductCard::price_label`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Currency code is malformed or not known to the facility.
    #[error("Unsupported currency code: {0}")]
    UnsupportedCurrency(String),

    /// Locale has no formatting data.
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// No formatting facility in this runtime.
    #[error("Currency formatting facility unavailable")]
    FacilityUnavailable,

    /// The facility threw while formatting.
    #[error("Formatter rejected input: {0}")]
    Rejected(String),
}

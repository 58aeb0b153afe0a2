//! Price label formatting.
//!
//! Locale-aware currency formatting is treated as a capability that may be
//! missing or may reject its input. Every failure is recovered with a fixed
//! label: a literal `$` followed by the price rounded to two decimals the
//! way `Number.prototype.toFixed(2)` rounds.
//!
//! On `wasm32` the capability is the browser's `Intl.NumberFormat`; on host
//! targets it is a built-in formatter backed by [`Currency`] and
//! [`Locale`] data.
//!
//! [`Currency`]: crate::currency::Currency

mod locale;

#[cfg(not(target_arch = "wasm32"))]
mod host;
#[cfg(target_arch = "wasm32")]
mod intl;

pub use locale::{Locale, LocaleData, SymbolPlacement, DEFAULT_LOCALE, LOCALE_ENV};
pub(crate) use locale::is_meaningful_tag;

use crate::error::FormatError;

/// Upper bound on rendered fraction digits.
pub const MAX_FRACTION_DIGITS: usize = 2;

/// Prefix of the fallback label, independent of the requested currency.
pub const FALLBACK_SYMBOL: &str = "$";

/// A formatted price and, if the locale formatter failed, why.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLabel {
    pub text: String,
    pub fallback_reason: Option<FormatError>,
}

impl PriceLabel {
    /// Whether the fixed fallback format was used.
    pub fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Format a price for display, never failing.
pub fn format_price(price: f64, currency_code: &str, locale: &Locale) -> String {
    price_label(price, currency_code, locale).text
}

/// Format a price, recording whether the fallback was taken.
pub fn price_label(price: f64, currency_code: &str, locale: &Locale) -> PriceLabel {
    match try_format_price(price, currency_code, locale) {
        Ok(text) => PriceLabel {
            text,
            fallback_reason: None,
        },
        Err(reason) => PriceLabel {
            text: fallback_price_label(price),
            fallback_reason: Some(reason),
        },
    }
}

/// Locale-aware currency formatting with at most two fraction digits.
pub fn try_format_price(
    price: f64,
    currency_code: &str,
    locale: &Locale,
) -> Result<String, FormatError> {
    if currency_code.len() != 3 || !currency_code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FormatError::UnsupportedCurrency(currency_code.to_string()));
    }

    #[cfg(target_arch = "wasm32")]
    {
        intl::format(price, currency_code, locale)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        host::format(price, currency_code, locale)
    }
}

/// The fixed fallback label: `$` + `price.toFixed(2)`.
pub fn fallback_price_label(price: f64) -> String {
    format!("{}{}", FALLBACK_SYMBOL, to_fixed(price, MAX_FRACTION_DIGITS))
}

/// `Number.prototype.toFixed` semantics.
///
/// Exact ties round away from zero, negative zero prints unsigned, and
/// magnitudes of `1e21` and above use exponent notation.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() || value.abs() >= 1e21 {
        return js_number_to_string(value);
    }

    let magnitude = round_half_up(value.abs(), digits);
    if value < 0.0 {
        format!("-{}", magnitude)
    } else {
        magnitude
    }
}

/// Render a non-negative finite value with `digits` fraction digits,
/// breaking exact ties upwards.
pub(crate) fn round_half_up(value: f64, digits: usize) -> String {
    // A tie at `digits` places is exactly representable only when
    // value * 2^(digits + 1) is an odd integer.
    let scaled = value * 2f64.powi(digits as i32 + 1);
    if scaled.fract() == 0.0 && scaled % 2.0 == 1.0 {
        let pow = 10f64.powi(digits as i32);
        let rounded = (value * pow).ceil() / pow;
        return format!("{:.*}", digits, rounded);
    }
    format!("{:.*}", digits, value)
}

fn js_number_to_string(value: f64) -> String {
    if value.is_infinite() {
        let s = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return s.to_string();
    }

    let s = format!("{:e}", value);
    match s.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => s,
    }
}

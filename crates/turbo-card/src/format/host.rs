//! Built-in currency formatter for non-browser targets.

use super::{round_half_up, Locale, LocaleData, SymbolPlacement, MAX_FRACTION_DIGITS};
use crate::currency::Currency;
use crate::error::FormatError;

const NBSP: char = '\u{a0}';

pub(super) fn format(price: f64, currency_code: &str, locale: &Locale) -> Result<String, FormatError> {
    let currency = Currency::from_code(currency_code)
        .ok_or_else(|| FormatError::UnsupportedCurrency(currency_code.to_string()))?;
    let data = locale
        .data()
        .ok_or_else(|| FormatError::UnsupportedLocale(locale.tag().to_string()))?;

    let min_digits = (currency.decimal_places() as usize).min(MAX_FRACTION_DIGITS);
    let number = format_number(price.abs(), min_digits, &data);
    let symbol = data.symbol(currency);
    let sign = if price.is_sign_negative() && !price.is_nan() {
        "-"
    } else {
        ""
    };

    let label = match data.placement {
        SymbolPlacement::Prefix if is_letter_code(symbol) => {
            format!("{}{}{}{}", sign, symbol, NBSP, number)
        }
        SymbolPlacement::Prefix => format!("{}{}{}", sign, symbol, number),
        SymbolPlacement::Suffix => format!("{}{}{}{}", sign, number, NBSP, symbol),
    };
    Ok(label)
}

fn format_number(magnitude: f64, min_digits: usize, data: &LocaleData) -> String {
    if magnitude.is_nan() {
        return "NaN".to_string();
    }
    if magnitude.is_infinite() {
        return "\u{221e}".to_string();
    }

    let fixed = round_half_up(magnitude, MAX_FRACTION_DIGITS);
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut fraction = fraction.to_string();
    while fraction.len() > min_digits && fraction.ends_with('0') {
        fraction.pop();
    }

    let grouped = if data.groups(integer.len()) {
        group_digits(integer, data.group_separator)
    } else {
        integer.to_string()
    };
    if fraction.is_empty() {
        grouped
    } else {
        format!("{}{}{}", grouped, data.decimal_separator, fraction)
    }
}

/// A bare letter code ("CHF") needs a space before the amount.
fn is_letter_code(symbol: &str) -> bool {
    symbol.chars().last().is_some_and(|c| c.is_ascii_alphabetic())
}

fn group_digits(integer: &str, separator: char) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len_utf8());
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(digit);
    }
    out
}

//! ISO 4217 currencies known to the built-in formatter.

/// Currency code used when a listing does not specify one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
    NZD,
    CHF,
    CNY,
    HKD,
    INR,
    KRW,
    MXN,
    BRL,
    SEK,
    NOK,
    DKK,
    PLN,
    KWD,
}

impl Currency {
    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
            Currency::NZD => "NZ$",
            Currency::CHF => "CHF",
            Currency::CNY => "CN\u{00a5}",
            Currency::HKD => "HK$",
            Currency::INR => "\u{20b9}",
            Currency::KRW => "\u{20a9}",
            Currency::MXN => "MX$",
            Currency::BRL => "R$",
            Currency::SEK => "SEK",
            Currency::NOK => "NOK",
            Currency::DKK => "DKK",
            Currency::PLN => "PLN",
            Currency::KWD => "KWD",
        }
    }

    /// Get the number of minor-unit digits for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY | Currency::KRW => 0,
            Currency::KWD => 3,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    ///
    /// Codes are three ASCII letters, matched case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        match code.to_ascii_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            "NZD" => Some(Currency::NZD),
            "CHF" => Some(Currency::CHF),
            "CNY" => Some(Currency::CNY),
            "HKD" => Some(Currency::HKD),
            "INR" => Some(Currency::INR),
            "KRW" => Some(Currency::KRW),
            "MXN" => Some(Currency::MXN),
            "BRL" => Some(Currency::BRL),
            "SEK" => Some(Currency::SEK),
            "NOK" => Some(Currency::NOK),
            "DKK" => Some(Currency::DKK),
            "PLN" => Some(Currency::PLN),
            "KWD" => Some(Currency::KWD),
            _ => None,
        }
    }
}

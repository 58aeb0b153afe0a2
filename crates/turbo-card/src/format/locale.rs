//! Locale tags and the separator data the host formatter needs.

use std::fmt;

use crate::currency::Currency;

/// Locale used when neither configuration nor environment supplies one.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Environment variable overriding the formatting locale.
pub const LOCALE_ENV: &str = "TURBO_CARD_LOCALE";

/// Environment variables consulted for the runtime locale, highest
/// precedence first.
const LOCALE_ENV_CHAIN: [&str; 4] = [LOCALE_ENV, "LC_ALL", "LC_MONETARY", "LANG"];

/// Where the currency symbol sits relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPlacement {
    /// `$1,234.50`
    Prefix,
    /// `1.234,50 €`
    Suffix,
}

/// Number formatting conventions for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleData {
    pub decimal_separator: char,
    pub group_separator: char,
    pub placement: SymbolPlacement,
    /// Integer digits needed before grouping kicks in beyond the first
    /// group: 1 groups `1,234`, 2 leaves `1234` alone but groups `12.345`.
    pub min_grouping_digits: usize,
    /// Currencies whose local symbol differs from the international one.
    local_symbols: &'static [(Currency, &'static str)],
}

impl LocaleData {
    const fn new(decimal_separator: char, group_separator: char, placement: SymbolPlacement) -> Self {
        Self {
            decimal_separator,
            group_separator,
            placement,
            min_grouping_digits: 1,
            local_symbols: &[],
        }
    }

    const fn min_grouping(mut self, digits: usize) -> Self {
        self.min_grouping_digits = digits;
        self
    }

    const fn symbols(mut self, local_symbols: &'static [(Currency, &'static str)]) -> Self {
        self.local_symbols = local_symbols;
        self
    }

    fn for_language(language: &str) -> Option<Self> {
        use SymbolPlacement::{Prefix, Suffix};

        let data = match language {
            "en" | "ko" => Self::new('.', ',', Prefix),
            "ja" => Self::new('.', ',', Prefix).symbols(&[(Currency::JPY, "\u{ffe5}")]),
            "zh" => Self::new('.', ',', Prefix).symbols(&[(Currency::CNY, "\u{00a5}")]),
            "de" | "it" => Self::new(',', '.', Suffix),
            "es" => Self::new(',', '.', Suffix).min_grouping(2),
            "fr" => Self::new(',', '\u{202f}', Suffix),
            "sv" => Self::new(',', '\u{a0}', Suffix).symbols(&[(Currency::SEK, "kr")]),
            "pl" => Self::new(',', '\u{a0}', Suffix)
                .min_grouping(2)
                .symbols(&[(Currency::PLN, "z\u{142}")]),
            _ => return None,
        };
        Some(data)
    }

    /// Symbol for `currency` in this locale.
    pub fn symbol(&self, currency: Currency) -> &'static str {
        self.local_symbols
            .iter()
            .find(|(c, _)| *c == currency)
            .map(|(_, symbol)| *symbol)
            .unwrap_or_else(|| currency.symbol())
    }

    /// Whether an integer part of `len` digits gets group separators.
    pub fn groups(&self, len: usize) -> bool {
        len >= 3 + self.min_grouping_digits
    }
}

/// A BCP-47-like locale tag.
///
/// Any tag can be represented; tags whose language has no formatting data
/// make the host formatter fail, which sends the card to its fallback label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    tag: String,
    data: Option<LocaleData>,
}

impl Locale {
    /// Build a locale from a tag such as `en-US`, `de_DE` or `fr_FR.UTF-8`.
    pub fn new(tag: &str) -> Self {
        let tag = normalize_tag(tag);
        let language = tag
            .split('-')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let data = LocaleData::for_language(&language);
        Self { tag, data }
    }

    /// The locale of the running environment.
    ///
    /// In the browser this is the empty tag, which leaves the choice to the
    /// runtime's own default. On host targets the tag is read from
    /// `TURBO_CARD_LOCALE`, `LC_ALL`, `LC_MONETARY` and `LANG`, in that order.
    pub fn runtime_default() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self {
                tag: String::new(),
                data: None,
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::from_env(|key| std::env::var(key).ok())
        }
    }

    /// Resolve a locale from environment-style lookups. `C` and `POSIX`
    /// carry no language and are skipped.
    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        LOCALE_ENV_CHAIN
            .iter()
            .filter_map(|key| lookup(key))
            .find(|value| is_meaningful_tag(value))
            .map(|value| Self::new(&value))
            .unwrap_or_else(|| Self::new(DEFAULT_LOCALE))
    }

    /// Whether formatting defers to the runtime's default locale.
    pub fn is_runtime_default(&self) -> bool {
        self.tag.is_empty()
    }

    /// Normalized tag (`en-US`).
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether the host formatter has data for this locale.
    pub fn is_supported(&self) -> bool {
        self.data.is_some()
    }

    pub fn data(&self) -> Option<LocaleData> {
        self.data
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::runtime_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)
    }
}

pub(crate) fn is_meaningful_tag(value: &str) -> bool {
    let base = normalize_tag(value);
    !base.is_empty() && base != "C" && base != "POSIX"
}

/// Strip POSIX encoding/modifier suffixes and use `-` as the separator.
fn normalize_tag(tag: &str) -> String {
    let tag = tag.trim();
    let tag = tag.split(['.', '@']).next().unwrap_or_default();
    tag.replace('_', "-")
}

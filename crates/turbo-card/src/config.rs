//! Card configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use turbo_observability::{CardContext, LogFormat, LogLevel, StructuredLogger};

use crate::actions::DEFAULT_PRODUCT_PATH_PREFIX;
use crate::format::{is_meaningful_tag, Locale};
use crate::selection::DisabledVariantPolicy;

pub use crate::format::LOCALE_ENV;

/// Environment variable overriding the minimum log level.
pub const LOG_LEVEL_ENV: &str = "TURBO_CARD_LOG_LEVEL";

/// Storefront-wide settings shared by every card on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    /// Locale tag used for price labels (e.g., "en-US"). Unset means the
    /// runtime's default locale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Path prefix of the product detail view.
    #[serde(default = "default_product_path_prefix")]
    pub product_path_prefix: String,

    /// How disabled variants interact with selection.
    #[serde(default)]
    pub disabled_variants: DisabledVariantPolicy,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level emitted.
    #[serde(default)]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_product_path_prefix() -> String {
    DEFAULT_PRODUCT_PATH_PREFIX.to_string()
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            locale: None,
            product_path_prefix: default_product_path_prefix(),
            disabled_variants: DisabledVariantPolicy::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CardConfig {
    /// Load config from a `.json` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `TURBO_CARD_LOCALE` and `TURBO_CARD_LOG_LEVEL`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(locale) = lookup(LOCALE_ENV).filter(|v| is_meaningful_tag(v)) {
            self.locale = Some(locale);
        }

        if let Some(level) = lookup(LOG_LEVEL_ENV).and_then(|v| v.parse().ok()) {
            self.logging.level = level;
        }

        self
    }

    /// Pin the locale instead of following the runtime default.
    pub fn with_locale(mut self, tag: impl Into<String>) -> Self {
        self.locale = Some(tag.into());
        self
    }

    /// The configured locale, or the runtime default when unset.
    pub fn locale(&self) -> Locale {
        self.locale
            .as_deref()
            .map(Locale::new)
            .unwrap_or_else(Locale::runtime_default)
    }

    /// A logger for one card, configured from the logging section.
    pub fn logger(&self, context: CardContext) -> StructuredLogger {
        StructuredLogger::new(context)
            .with_min_level(self.logging.level)
            .with_format(self.logging.format)
    }
}

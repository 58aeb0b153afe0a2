//! Listing and variant types supplied to a product card.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::currency::DEFAULT_CURRENCY;
use crate::error::CardError;
use crate::ids::{ProductId, VariantId};

/// A selectable sub-option of a product (e.g., size or color).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Identifier, unique within the listing's variants.
    pub id: VariantId,
    /// Text shown in the selector.
    pub label: String,
    /// Marked unavailable in the selector.
    #[serde(default)]
    pub disabled: bool,
}

impl Variant {
    pub fn new(id: impl Into<VariantId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Product data a card renders. Immutable while bound to a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    pub id: ProductId,
    pub name: String,
    /// Display price. Coerced from JSON like a JavaScript `Number(...)` call.
    #[serde(default = "missing_price", deserialize_with = "deserialize_price")]
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn missing_price() -> f64 {
    f64::NAN
}

impl ProductListing {
    /// Create an out-of-stock listing with no variants, priced in USD.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            currency: default_currency(),
            image_url: String::new(),
            in_stock: false,
            variants: Vec::new(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = variants;
        self
    }

    /// Parse listing props from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, CardError> {
        let listing: Self = serde_json::from_str(json)?;
        listing.validate()?;
        Ok(listing)
    }

    /// Check that variant identifiers are unique.
    pub fn validate(&self) -> Result<(), CardError> {
        let mut seen = HashSet::new();
        for variant in &self.variants {
            if !seen.insert(variant.id.as_str()) {
                return Err(CardError::InvalidListing(format!(
                    "duplicate variant id {:?} in product {}",
                    variant.id.as_str(),
                    self.id
                )));
            }
        }
        Ok(())
    }

    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    pub fn find_variant(&self, id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

/// Convert a JSON value to a number the way JavaScript's `Number(...)` does.
pub fn coerce_number(value: &serde_json::Value) -> f64 {
    use serde_json::Value;

    match value {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_numeric_string(s),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [Value::Null] => 0.0,
            [single @ (Value::Number(_) | Value::String(_) | Value::Array(_))] => {
                coerce_number(single)
            }
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

fn parse_numeric_string(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .iter()
        .find_map(|(prefix, radix)| s.strip_prefix(prefix).map(|digits| (digits, *radix)));
    if let Some((digits, radix)) = radix {
        return u64::from_str_radix(digits, radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    // Rust also accepts "inf" and "nan", which JavaScript does not.
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_defaults_from_json() {
        let listing =
            ProductListing::from_json(r#"{"id":"p1","name":"Mug","price":12.5}"#).unwrap();
        assert_eq!(listing.id, "p1");
        assert_eq!(listing.currency, "USD");
        assert!(!listing.in_stock);
        assert!(!listing.has_variants());
        assert_eq!(listing.price, 12.5);
    }

    #[test]
    fn test_listing_camel_case_props() {
        let listing = ProductListing::from_json(
            r#"{
                "id": "p1",
                "name": "Tee",
                "price": "19.99",
                "currency": "EUR",
                "imageUrl": "/img/tee.png",
                "inStock": true,
                "variants": [
                    {"id": "s", "label": "Small", "disabled": true},
                    {"id": "m", "label": "Medium"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(listing.price, 19.99);
        assert_eq!(listing.image_url, "/img/tee.png");
        assert!(listing.in_stock);
        assert!(listing.variants[0].disabled);
        assert!(!listing.variants[1].disabled);
        assert_eq!(listing.find_variant("m").map(|v| v.label.as_str()), Some("Medium"));
        assert!(listing.find_variant("xl").is_none());
    }

    #[test]
    fn test_missing_or_non_numeric_price_is_nan() {
        let missing = ProductListing::from_json(r#"{"id":"p1","name":"Mug"}"#).unwrap();
        assert!(missing.price.is_nan());

        let object = ProductListing::from_json(r#"{"id":"p1","name":"Mug","price":{}}"#).unwrap();
        assert!(object.price.is_nan());
    }

    #[test]
    fn test_duplicate_variant_ids_rejected() {
        let err = ProductListing::from_json(
            r#"{"id":"p1","name":"Tee","price":1,"variants":[
                {"id":"s","label":"Small"},{"id":"s","label":"Also small"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CardError::InvalidListing(_)));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = ProductListing::from_json("{").unwrap_err();
        assert!(matches!(err, CardError::SerializationError(_)));
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(null)), 0.0);
        assert_eq!(coerce_number(&json!(true)), 1.0);
        assert_eq!(coerce_number(&json!(false)), 0.0);
        assert_eq!(coerce_number(&json!(4.25)), 4.25);
        assert_eq!(coerce_number(&json!("  7 ")), 7.0);
        assert_eq!(coerce_number(&json!("")), 0.0);
        assert_eq!(coerce_number(&json!("1e3")), 1000.0);
        assert_eq!(coerce_number(&json!(".5")), 0.5);
        assert_eq!(coerce_number(&json!("0x1F")), 31.0);
        assert_eq!(coerce_number(&json!("-Infinity")), f64::NEG_INFINITY);
        assert_eq!(coerce_number(&json!([])), 0.0);
        assert_eq!(coerce_number(&json!(["3"])), 3.0);
        assert!(coerce_number(&json!("abc")).is_nan());
        assert!(coerce_number(&json!("inf")).is_nan());
        assert!(coerce_number(&json!("NaN")).is_nan());
        assert!(coerce_number(&json!("12px")).is_nan());
        assert!(coerce_number(&json!([1, 2])).is_nan());
        assert!(coerce_number(&json!({"a": 1})).is_nan());
    }

    #[test]
    fn test_builder() {
        let listing = ProductListing::new("p1", "Mug", 9.0)
            .with_currency("GBP")
            .with_image("/mug.png")
            .with_stock(true)
            .with_variants(vec![Variant::new("a", "A").with_disabled(true)]);

        assert_eq!(listing.currency, "GBP");
        assert!(listing.in_stock);
        assert!(listing.has_variants());
        assert!(listing.validate().is_ok());
    }
}

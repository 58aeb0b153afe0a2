//! `Intl.NumberFormat` bridge for browser targets.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use super::{Locale, MAX_FRACTION_DIGITS};
use crate::error::FormatError;

pub(super) fn format(price: f64, currency_code: &str, locale: &Locale) -> Result<String, FormatError> {
    let intl = Reflect::get(&js_sys::global(), &JsValue::from_str("Intl"))
        .map_err(|_| FormatError::FacilityUnavailable)?;
    let constructor = function(&intl, "NumberFormat").ok_or(FormatError::FacilityUnavailable)?;

    if !is_supported_currency(&intl, currency_code) {
        return Err(FormatError::UnsupportedCurrency(currency_code.to_string()));
    }

    // An empty tag defers to the runtime's default locale.
    let locales = if locale.tag().is_empty() {
        JsValue::UNDEFINED
    } else {
        JsValue::from_str(locale.tag())
    };

    let options = Object::new();
    set(&options, "style", &JsValue::from_str("currency"))?;
    set(&options, "currency", &JsValue::from_str(currency_code))?;
    set(
        &options,
        "maximumFractionDigits",
        &JsValue::from_f64(MAX_FRACTION_DIGITS as f64),
    )?;

    // Reflect::construct turns a RangeError from the constructor into Err.
    let formatter = Reflect::construct(&constructor, &Array::of2(&locales, &options))
        .map_err(rejected)?;
    let format = function(&formatter, "format").ok_or(FormatError::FacilityUnavailable)?;

    format
        .call1(&formatter, &JsValue::from_f64(price))
        .map_err(rejected)?
        .as_string()
        .ok_or(FormatError::FacilityUnavailable)
}

/// Consult `Intl.supportedValuesOf("currency")` when the runtime has it.
/// Older runtimes only reject malformed codes, so anything passes there.
fn is_supported_currency(intl: &JsValue, currency_code: &str) -> bool {
    let Some(supported_values_of) = function(intl, "supportedValuesOf") else {
        return true;
    };

    match supported_values_of.call1(intl, &JsValue::from_str("currency")) {
        Ok(list) => Array::from(&list).includes(
            &JsValue::from_str(&currency_code.to_ascii_uppercase()),
            0,
        ),
        Err(_) => true,
    }
}

fn function(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), FormatError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(rejected)
}

fn rejected(err: JsValue) -> FormatError {
    let message = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "unknown error".to_string());
    FormatError::Rejected(message)
}

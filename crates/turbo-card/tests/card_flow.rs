//! End-to-end behavior of a product card: formatting, selection and
//! call-to-action payloads, driven through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use turbo_card::format::{fallback_price_label, format_price, price_label, Locale};
use turbo_card::prelude::*;
use turbo_observability::{CardContext, LogCapture, LogLevel, StructuredLogger};

type Received<T> = Rc<RefCell<Vec<T>>>;

fn listing(id: &str, in_stock: bool, variants: &[(&str, bool)]) -> ProductListing {
    ProductListing::new(id, format!("Product {}", id), 19.5)
        .with_stock(in_stock)
        .with_variants(
            variants
                .iter()
                .map(|(vid, disabled)| Variant::new(*vid, vid.to_uppercase()).with_disabled(*disabled))
                .collect(),
        )
}

/// A card with recording collaborators and a debug-level log capture.
fn recording_card(
    listing: ProductListing,
) -> (
    ProductCard,
    Received<AddToCartIntent>,
    Received<NavigationIntent>,
    LogCapture,
) {
    let carts: Received<AddToCartIntent> = Rc::default();
    let navs: Received<NavigationIntent> = Rc::default();
    let capture = LogCapture::new();

    let cart_sink = Rc::clone(&carts);
    let nav_sink = Rc::clone(&navs);
    let logger = StructuredLogger::new(CardContext::default())
        .with_min_level(LogLevel::Debug)
        .with_capture(capture.clone());

    let card = ProductCard::new(listing, &CardConfig::default().with_locale("en-US"))
        .with_logger(logger)
        .with_cart(move |intent: AddToCartIntent| cart_sink.borrow_mut().push(intent))
        .with_navigator(move |intent: NavigationIntent| nav_sink.borrow_mut().push(intent));

    (card, carts, navs, capture)
}

#[test]
fn test_unresolvable_currency_uses_fallback() {
    let locale = Locale::new("en-US");
    assert_eq!(format_price(19.5, "ZZZ", &locale), "$19.50");

    let label = price_label(19.5, "ZZZ", &locale);
    assert!(label.is_fallback());
    assert!(matches!(
        label.fallback_reason,
        Some(FormatError::UnsupportedCurrency(_))
    ));
}

#[test]
fn test_usd_rounds_to_two_decimals() {
    let text = format_price(9.999, "USD", &Locale::new("en-US"));
    assert!(text.contains("10.00") || text.contains("9.99"), "got {}", text);
}

#[test]
fn test_nan_price_and_fallback_ties() {
    assert_eq!(format_price(f64::NAN, "QQQ", &Locale::default()), "$NaN");
    assert_eq!(fallback_price_label(0.125), "$0.13");
    assert_eq!(fallback_price_label(-2.5), "$-2.50");
}

#[test]
fn test_initial_selection_skips_disabled() {
    let (card, _, _, _) = recording_card(listing("p1", true, &[("a", true), ("b", false), ("c", false)]));
    assert_eq!(card.selected_variant_id(), "b");
}

#[test]
fn test_initial_selection_all_disabled_falls_back_to_first() {
    let (card, _, _, _) = recording_card(listing("p1", true, &[("a", true)]));
    assert_eq!(card.selected_variant_id(), "a");
    assert!(!card.cta_disabled());
}

#[test]
fn test_no_variants_cta_follows_stock() {
    let (card, _, _, _) = recording_card(listing("p1", true, &[]));
    assert_eq!(card.selected_variant_id(), "");
    assert!(!card.cta_disabled());

    let (card, _, _, _) = recording_card(listing("p1", false, &[]));
    assert!(card.cta_disabled());
}

#[test]
fn test_out_of_stock_emits_nothing() {
    let (mut card, carts, navs, capture) = recording_card(listing("p1", false, &[("a", false)]));
    assert!(card.cta_disabled());
    assert_eq!(
        card.add_to_cart(),
        ActionOutcome::Suppressed(CtaBlock::OutOfStock)
    );
    assert_eq!(card.buy_now(), ActionOutcome::Suppressed(CtaBlock::OutOfStock));

    assert!(carts.borrow().is_empty());
    assert!(navs.borrow().is_empty());
    assert!(capture.with_message("add to cart emitted").is_empty());
}

#[test]
fn test_add_to_cart_payload_with_variant() {
    let (mut card, carts, _, capture) = recording_card(listing("p1", true, &[("a", false), ("b", false)]));
    card.select_variant("b").unwrap();

    assert_eq!(card.add_to_cart(), ActionOutcome::Emitted);
    let carts = carts.borrow();
    assert_eq!(carts.len(), 1);
    assert_eq!(
        serde_json::to_value(&carts[0]).unwrap(),
        serde_json::json!({"productId": "p1", "variantId": "b"})
    );

    let emitted = capture.with_message("add to cart emitted");
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].level, LogLevel::Info);
    assert_eq!(emitted[0].product_id, "p1");
}

#[test]
fn test_add_to_cart_payload_without_variants() {
    let (mut card, carts, _, _) = recording_card(listing("p1", true, &[]));
    assert_eq!(card.add_to_cart(), ActionOutcome::Emitted);
    assert_eq!(
        serde_json::to_value(&carts.borrow()[0]).unwrap(),
        serde_json::json!({"productId": "p1"})
    );
}

#[test]
fn test_switching_products_resets_selection() {
    let (mut card, _, _, capture) = recording_card(listing("A", true, &[("w", true), ("x", false)]));
    assert_eq!(card.selected_variant_id(), "x");

    let outcome = card.rebind(listing("B", true, &[("x", true), ("y", false)]));
    assert_eq!(outcome, Rebind::Reinitialized);
    assert_eq!(card.selected_variant_id(), "y");

    let initialized = capture.with_message("selection initialized");
    let last = initialized.last().unwrap();
    assert_eq!(last.product_id, "B");
    assert_eq!(last.field("variant_id"), Some(&serde_json::json!("y")));
}

#[test]
fn test_rebind_same_product_keeps_selection() {
    let (mut card, _, _, _) = recording_card(listing("p1", true, &[("a", false), ("b", false)]));
    card.select_variant("b").unwrap();

    let restocked = listing("p1", false, &[("a", false), ("b", false)]);
    assert_eq!(card.rebind(restocked), Rebind::Kept);
    assert_eq!(card.selected_variant_id(), "b");
    assert!(card.cta_disabled());
}

#[test]
fn test_buy_now_only_when_enabled() {
    let (mut card, _, navs, _) = recording_card(listing("p1", true, &[]));
    assert_eq!(card.buy_now(), ActionOutcome::Emitted);
    assert_eq!(navs.borrow()[0].path, "/product/p1");

    card.rebind(listing("p1", false, &[]));
    assert_eq!(card.buy_now(), ActionOutcome::Suppressed(CtaBlock::OutOfStock));
    assert_eq!(navs.borrow().len(), 1);
}

#[test]
fn test_user_may_select_disabled_variant() {
    let (mut card, carts, _, _) = recording_card(listing("p1", true, &[("a", true), ("b", false)]));
    card.select_variant("a").unwrap();
    assert_eq!(card.add_to_cart(), ActionOutcome::Emitted);
    assert_eq!(
        carts.borrow()[0].variant_id.as_ref().map(|v| v.as_str()),
        Some("a")
    );
}

#[test]
fn test_json_props_coerce_price() {
    let listing = ProductListing::from_json(
        r#"{"id":"p9","name":"Lamp","price":"42","inStock":true,"currency":"EUR"}"#,
    )
    .unwrap();
    assert_eq!(listing.price, 42.0);

    let card = ProductCard::new(listing, &CardConfig::default().with_locale("en-US"));
    let view = card.view();
    assert_eq!(view.price_label, "€42.00");
    assert_eq!(view.stock_label, "In stock");
}

#[test]
fn test_config_drives_locale_and_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("card.toml");
    std::fs::write(&path, "locale = \"de-DE\"\nproduct_path_prefix = \"/p\"\n").unwrap();
    let config = CardConfig::load(&path).unwrap();

    let navigated: Received<NavigationIntent> = Rc::default();
    let sink = Rc::clone(&navigated);
    let mut card = ProductCard::new(listing("p1", true, &[]).with_currency("EUR"), &config)
        .with_navigator(move |intent: NavigationIntent| sink.borrow_mut().push(intent));

    assert_eq!(card.price_label(), "19,50\u{a0}€");
    card.buy_now();
    assert_eq!(navigated.borrow()[0].path, "/p/p1");

    assert!(CardConfig::load(dir.path().join("missing.toml")).is_err());
}

#[test]
fn test_runtime_locale_from_environment_lookup() {
    let env = |key: &str| (key == "LANG").then(|| "de_DE.UTF-8".to_string());
    let config = CardConfig::default();
    assert_eq!(config.locale, None);

    let locale = Locale::from_env(env);
    assert_eq!(format_price(19.5, "EUR", &locale), "19,50\u{a0}€");
}

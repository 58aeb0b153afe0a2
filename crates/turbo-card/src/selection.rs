//! Variant selection state and call-to-action eligibility.
//!
//! ```text
//! Uninitialized --initialize--> Selected(id)
//! Selected(id)  --select(id2)--> Selected(id2)
//! Selected(id)  --reset-------> Uninitialized   (product rebind)
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{ProductListing, Variant};
use crate::ids::ProductId;

/// Which variant a card currently has chosen.
///
/// `Selected("")` means "no variant" and is the state of a card whose
/// listing has no variants.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Uninitialized,
    Selected(String),
}

impl SelectionState {
    /// State right after initialization for the given variants.
    pub fn initial(variants: &[Variant]) -> Self {
        SelectionState::Selected(initial_variant_id(variants).to_string())
    }

    /// Apply the initialization rule. Only acts on an uninitialized state.
    pub fn initialize(&mut self, variants: &[Variant]) {
        if let SelectionState::Uninitialized = self {
            *self = Self::initial(variants);
        }
    }

    /// Replace the selected identifier unconditionally.
    pub fn select(&mut self, id: impl Into<String>) {
        *self = SelectionState::Selected(id.into());
    }

    /// Forget the selection so the next `initialize` recomputes it.
    pub fn reset(&mut self) {
        *self = SelectionState::Uninitialized;
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self, SelectionState::Selected(_))
    }

    /// The selected identifier; empty when uninitialized or when none is chosen.
    pub fn selected_id(&self) -> &str {
        match self {
            SelectionState::Uninitialized => "",
            SelectionState::Selected(id) => id,
        }
    }
}

/// Initial selection: the first enabled variant, else the first variant,
/// else the empty identifier.
pub fn initial_variant_id(variants: &[Variant]) -> &str {
    variants
        .iter()
        .find(|v| !v.disabled)
        .or_else(|| variants.first())
        .map(|v| v.id.as_str())
        .unwrap_or("")
}

/// Whether binding `next` in place of `current` must recompute the
/// selection: the product identity or its variant list changed.
pub fn needs_reinit(current: &ProductListing, next: &ProductListing) -> bool {
    !same_binding(&current.id, &current.variants, next)
}

fn same_binding(product_id: &ProductId, variants: &[Variant], listing: &ProductListing) -> bool {
    *product_id == listing.id && variants == listing.variants.as_slice()
}

/// A selection remembered together with the listing it was made for.
///
/// Reading it against a listing it is not bound to yields that listing's
/// initial selection, so a renderer that swaps listings never observes the
/// old product's choice paired with the new product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundSelection {
    product_id: ProductId,
    variants: Vec<Variant>,
    state: SelectionState,
}

impl BoundSelection {
    /// Bind to `listing` with its initial selection.
    pub fn new(listing: &ProductListing) -> Self {
        Self {
            product_id: listing.id.clone(),
            variants: listing.variants.clone(),
            state: SelectionState::initial(&listing.variants),
        }
    }

    pub fn is_bound_to(&self, listing: &ProductListing) -> bool {
        same_binding(&self.product_id, &self.variants, listing)
    }

    /// The selection in effect for `listing`.
    pub fn current(&self, listing: &ProductListing) -> SelectionState {
        if self.is_bound_to(listing) {
            self.state.clone()
        } else {
            SelectionState::initial(&listing.variants)
        }
    }

    /// Record a user choice made while `listing` was displayed.
    pub fn select(&mut self, listing: &ProductListing, id: impl Into<String>) {
        if !self.is_bound_to(listing) {
            *self = Self::new(listing);
        }
        self.state.select(id);
    }
}

/// How disabled variants interact with selection.
///
/// Disabled options are marked in the selector but not blocked: the
/// initialization fallback may land on one and a user may choose one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum DisabledVariantPolicy {
    #[default]
    Selectable,
}

impl DisabledVariantPolicy {
    /// Whether `variant` may become the selection.
    pub fn allows(&self, _variant: &Variant) -> bool {
        match self {
            DisabledVariantPolicy::Selectable => true,
        }
    }
}

/// Why the call-to-action controls are disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtaBlock {
    OutOfStock,
    NoSelection,
}

impl CtaBlock {
    pub fn as_str(&self) -> &'static str {
        match self {
            CtaBlock::OutOfStock => "out_of_stock",
            CtaBlock::NoSelection => "no_selection",
        }
    }
}

/// The reason the CTA is disabled, or `None` when it is enabled.
///
/// Stock is checked first. With variants present the selection must be a
/// non-empty identifier from the listing.
pub fn cta_block(listing: &ProductListing, selection: &SelectionState) -> Option<CtaBlock> {
    if !listing.in_stock {
        return Some(CtaBlock::OutOfStock);
    }
    if !listing.has_variants() {
        return None;
    }

    let id = selection.selected_id();
    if id.is_empty() || listing.find_variant(id).is_none() {
        Some(CtaBlock::NoSelection)
    } else {
        None
    }
}

pub fn is_cta_disabled(listing: &ProductListing, selection: &SelectionState) -> bool {
    cta_block(listing, selection).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variants(specs: &[(&str, bool)]) -> Vec<Variant> {
        specs
            .iter()
            .map(|(id, disabled)| Variant::new(*id, id.to_uppercase()).with_disabled(*disabled))
            .collect()
    }

    #[test]
    fn test_initial_picks_first_enabled() {
        let vs = variants(&[("a", true), ("b", false), ("c", false)]);
        assert_eq!(initial_variant_id(&vs), "b");
    }

    #[test]
    fn test_initial_falls_back_to_first_when_all_disabled() {
        let vs = variants(&[("a", true), ("z", true)]);
        assert_eq!(initial_variant_id(&vs), "a");
    }

    #[test]
    fn test_initial_empty_list() {
        assert_eq!(initial_variant_id(&[]), "");
        assert_eq!(SelectionState::initial(&[]), SelectionState::Selected(String::new()));
    }

    #[test]
    fn test_state_transitions() {
        let vs = variants(&[("x", false), ("y", false)]);
        let mut state = SelectionState::default();
        assert!(!state.is_initialized());
        assert_eq!(state.selected_id(), "");

        state.initialize(&vs);
        assert_eq!(state.selected_id(), "x");

        state.select("y");
        assert_eq!(state.selected_id(), "y");

        // A second initialize does not clobber the user's choice.
        state.initialize(&vs);
        assert_eq!(state.selected_id(), "y");

        state.reset();
        assert!(!state.is_initialized());
        state.initialize(&vs);
        assert_eq!(state.selected_id(), "x");
    }

    #[test]
    fn test_needs_reinit() {
        let a = ProductListing::new("p1", "Tee", 10.0)
            .with_variants(variants(&[("s", false), ("m", false)]));

        let repriced = ProductListing { price: 12.0, in_stock: true, ..a.clone() };
        assert!(!needs_reinit(&a, &repriced));

        let other = ProductListing::new("p2", "Tee", 10.0).with_variants(a.variants.clone());
        assert!(needs_reinit(&a, &other));

        let fewer = a.clone().with_variants(variants(&[("m", false)]));
        assert!(needs_reinit(&a, &fewer));
    }

    #[test]
    fn test_bound_selection_follows_listing() {
        let a = ProductListing::new("A", "Tee", 10.0)
            .with_variants(variants(&[("x", false), ("y", false)]));
        let b = ProductListing::new("B", "Mug", 10.0)
            .with_variants(variants(&[("w", false), ("x", false)]));

        let mut bound = BoundSelection::new(&a);
        bound.select(&a, "y");
        assert_eq!(bound.current(&a).selected_id(), "y");

        // B also lists "x"; A's choice must not leak into it.
        bound.select(&a, "x");
        assert_eq!(bound.current(&b).selected_id(), "w");
        assert!(!bound.is_bound_to(&b));

        bound.select(&b, "x");
        assert!(bound.is_bound_to(&b));
        assert_eq!(bound.current(&b).selected_id(), "x");
        assert_eq!(bound.current(&a).selected_id(), "x");
        assert!(!bound.is_bound_to(&a));
    }

    #[test]
    fn test_bound_selection_keeps_choice_across_stock_change() {
        let a = ProductListing::new("A", "Tee", 10.0)
            .with_stock(true)
            .with_variants(variants(&[("x", false), ("y", false)]));
        let mut bound = BoundSelection::new(&a);
        bound.select(&a, "y");

        let sold_out = a.clone().with_stock(false);
        assert_eq!(bound.current(&sold_out).selected_id(), "y");
    }

    #[test]
    fn test_disabled_variants_are_selectable() {
        let vs = variants(&[("a", true)]);
        assert!(DisabledVariantPolicy::default().allows(&vs[0]));
    }

    #[test]
    fn test_cta_without_variants_depends_on_stock() {
        let listing = ProductListing::new("p1", "Mug", 5.0).with_stock(true);
        let state = SelectionState::initial(&listing.variants);
        assert_eq!(cta_block(&listing, &state), None);

        let listing = listing.with_stock(false);
        assert_eq!(cta_block(&listing, &state), Some(CtaBlock::OutOfStock));
    }

    #[test]
    fn test_cta_out_of_stock_wins() {
        let listing = ProductListing::new("p1", "Tee", 5.0)
            .with_variants(variants(&[("s", false)]));
        let state = SelectionState::initial(&listing.variants);
        assert!(is_cta_disabled(&listing, &state));
        assert_eq!(cta_block(&listing, &state), Some(CtaBlock::OutOfStock));
    }

    #[test]
    fn test_cta_requires_listed_selection() {
        let listing = ProductListing::new("p1", "Tee", 5.0)
            .with_stock(true)
            .with_variants(variants(&[("s", false), ("m", false)]));

        assert!(!is_cta_disabled(&listing, &SelectionState::Selected("m".into())));
        assert_eq!(
            cta_block(&listing, &SelectionState::Selected(String::new())),
            Some(CtaBlock::NoSelection)
        );
        assert_eq!(
            cta_block(&listing, &SelectionState::Selected("xl".into())),
            Some(CtaBlock::NoSelection)
        );
        assert_eq!(
            cta_block(&listing, &SelectionState::Uninitialized),
            Some(CtaBlock::NoSelection)
        );
    }

    #[test]
    fn test_cta_enabled_on_disabled_fallback() {
        let listing = ProductListing::new("p1", "Tee", 5.0)
            .with_stock(true)
            .with_variants(variants(&[("a", true)]));
        let state = SelectionState::initial(&listing.variants);
        assert_eq!(state.selected_id(), "a");
        assert!(!is_cta_disabled(&listing, &state));
    }
}

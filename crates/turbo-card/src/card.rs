//! The product card controller.
//!
//! `ProductCard` owns one listing and its selection state, derives the
//! presentation values a renderer needs, and routes call-to-action
//! activations to the registered collaborators. All transitions take
//! `&mut self` and run synchronously on the UI event that caused them.
//!
//! A card is bound to one product at a time. Binding a different product
//! goes through [`ProductCard::rebind`], which re-runs the initial selection
//! rule; the listing is owned by the card, so there is no way to mutate its
//! variants in place behind the card's back.

use std::cell::Cell;

use serde::Serialize;
use turbo_observability::{CardContext, StructuredLogger};

use crate::actions::{
    build_add_to_cart, build_buy_now, ActionOutcome, CartSink, Navigator,
};
use crate::catalog::{ProductListing, Variant};
use crate::config::CardConfig;
use crate::error::CardError;
use crate::format::{price_label, Locale, PriceLabel};
use crate::selection::{
    cta_block, needs_reinit, CtaBlock, DisabledVariantPolicy, SelectionState,
};

/// Result of [`ProductCard::rebind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rebind {
    /// Same product and variants; the user's selection was kept.
    Kept,
    /// New product identity or variant list; selection recomputed.
    Reinitialized,
}

/// One option in the variant selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantOptionView {
    pub id: String,
    pub label: String,
    pub disabled: bool,
    pub selected: bool,
}

/// Everything a renderer needs to draw the card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub product_id: String,
    pub name: String,
    pub image_url: String,
    pub price_label: String,
    pub in_stock: bool,
    pub stock_label: &'static str,
    pub has_variants: bool,
    /// DOM id tying the selector to its label.
    pub selector_id: String,
    pub selector_disabled: bool,
    pub options: Vec<VariantOptionView>,
    pub selected_variant_id: String,
    pub cta_disabled: bool,
    pub add_to_cart_label: &'static str,
}

impl CardView {
    /// Derive the view from listing and selection.
    pub fn derive(listing: &ProductListing, selection: &SelectionState, locale: &Locale) -> Self {
        let label = price_label(listing.price, &listing.currency, locale);
        Self::with_price_label(listing, selection, label.text)
    }

    fn with_price_label(
        listing: &ProductListing,
        selection: &SelectionState,
        price_label: String,
    ) -> Self {
        let selected = selection.selected_id();
        let options = listing
            .variants
            .iter()
            .map(|v| VariantOptionView {
                id: v.id.to_string(),
                label: v.label.clone(),
                disabled: v.disabled,
                selected: v.id == selected,
            })
            .collect();

        Self {
            product_id: listing.id.to_string(),
            name: listing.name.clone(),
            image_url: listing.image_url.clone(),
            price_label,
            in_stock: listing.in_stock,
            stock_label: stock_label(listing.in_stock),
            has_variants: listing.has_variants(),
            selector_id: selector_id(listing),
            selector_disabled: !listing.in_stock,
            options,
            selected_variant_id: selected.to_string(),
            cta_disabled: cta_block(listing, selection).is_some(),
            add_to_cart_label: add_to_cart_label(listing.in_stock),
        }
    }
}

pub fn stock_label(in_stock: bool) -> &'static str {
    if in_stock {
        "In stock"
    } else {
        "Out of stock"
    }
}

pub fn add_to_cart_label(in_stock: bool) -> &'static str {
    if in_stock {
        "Add to Cart"
    } else {
        "Out of Stock"
    }
}

pub fn selector_id(listing: &ProductListing) -> String {
    format!("variant-{}", listing.id)
}

/// A product card bound to one listing.
pub struct ProductCard {
    listing: ProductListing,
    selection: SelectionState,
    locale: Locale,
    product_path_prefix: String,
    policy: DisabledVariantPolicy,
    cart: Option<Box<dyn CartSink>>,
    navigator: Option<Box<dyn Navigator>>,
    logger: StructuredLogger,
    /// The price fallback is reported once per binding.
    fallback_logged: Cell<bool>,
}

impl ProductCard {
    /// Bind a new card to `listing` and run the initial selection rule.
    pub fn new(listing: ProductListing, config: &CardConfig) -> Self {
        let logger = config.logger(context_for(&listing));
        let mut card = Self {
            listing,
            selection: SelectionState::Uninitialized,
            locale: config.locale(),
            product_path_prefix: config.product_path_prefix.clone(),
            policy: config.disabled_variants,
            cart: None,
            navigator: None,
            logger,
            fallback_logged: Cell::new(false),
        };
        card.initialize_selection();
        card
    }

    /// Register the add-to-cart collaborator.
    pub fn with_cart(mut self, cart: impl CartSink + 'static) -> Self {
        self.cart = Some(Box::new(cart));
        self
    }

    /// Register the navigation collaborator.
    pub fn with_navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Some(Box::new(navigator));
        self
    }

    /// Replace the logger, keeping the card context.
    pub fn with_logger(mut self, mut logger: StructuredLogger) -> Self {
        logger.set_context(context_for(&self.listing));
        self.logger = logger;
        self
    }

    pub fn listing(&self) -> &ProductListing {
        &self.listing
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_variant_id(&self) -> &str {
        self.selection.selected_id()
    }

    pub fn selected_variant(&self) -> Option<&Variant> {
        self.listing.find_variant(self.selection.selected_id())
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Locale-aware price label, falling back to `$` + two decimals.
    pub fn price_label(&self) -> String {
        self.formatted_price().text
    }

    fn formatted_price(&self) -> PriceLabel {
        let label = price_label(self.listing.price, &self.listing.currency, &self.locale);
        if let Some(reason) = &label.fallback_reason {
            if !self.fallback_logged.replace(true) {
                self.logger
                    .warn_builder("price formatting fell back")
                    .field("currency", self.listing.currency.as_str())
                    .field("locale", self.locale.tag())
                    .field("reason", reason.to_string())
                    .emit();
            }
        }
        label
    }

    /// Why the call-to-action controls are disabled, if they are.
    pub fn cta_block(&self) -> Option<CtaBlock> {
        cta_block(&self.listing, &self.selection)
    }

    pub fn cta_disabled(&self) -> bool {
        self.cta_block().is_some()
    }

    /// Snapshot for renderers.
    pub fn view(&self) -> CardView {
        let label = self.formatted_price();
        CardView::with_price_label(&self.listing, &self.selection, label.text)
    }

    /// The user picked a variant in the selector.
    ///
    /// Any listed identifier is accepted, disabled ones included.
    pub fn select_variant(&mut self, id: &str) -> Result<(), CardError> {
        let variant = self
            .listing
            .find_variant(id)
            .ok_or_else(|| CardError::UnknownVariant(id.to_string()))?;
        if !self.policy.allows(variant) {
            return Err(CardError::VariantUnavailable(id.to_string()));
        }

        self.selection.select(id);
        self.logger
            .debug_builder("variant selected")
            .field("variant_id", id)
            .field_bool("variant_disabled", variant.disabled)
            .emit();
        Ok(())
    }

    /// Bind the card to a (possibly) different listing.
    ///
    /// The selection is recomputed when the product id or the variant list
    /// changes; otherwise (e.g. a price or stock update for the same
    /// product) the user's choice is kept.
    pub fn rebind(&mut self, listing: ProductListing) -> Rebind {
        let reinit = needs_reinit(&self.listing, &listing);
        self.listing = listing;
        self.logger.set_context(context_for(&self.listing));
        self.fallback_logged.set(false);

        if !reinit {
            self.logger.debug("card rebound, selection kept");
            return Rebind::Kept;
        }

        self.selection.reset();
        self.initialize_selection();
        Rebind::Reinitialized
    }

    /// "Add to Cart" was activated.
    pub fn add_to_cart(&mut self) -> ActionOutcome {
        let intent = match build_add_to_cart(&self.listing, &self.selection) {
            Ok(intent) => intent,
            Err(block) => return self.suppressed("add_to_cart", block),
        };

        let Some(cart) = self.cart.as_mut() else {
            self.logger
                .debug_builder("no collaborator registered")
                .field("action", "add_to_cart")
                .emit();
            return ActionOutcome::NoCollaborator;
        };

        let variant_id = intent
            .variant_id
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_default();
        cart.add_to_cart(intent);
        self.logger
            .info_builder("add to cart emitted")
            .field("variant_id", variant_id)
            .emit();
        ActionOutcome::Emitted
    }

    /// "Buy Now" was activated.
    pub fn buy_now(&mut self) -> ActionOutcome {
        let intent = match build_buy_now(&self.listing, &self.selection, &self.product_path_prefix)
        {
            Ok(intent) => intent,
            Err(block) => return self.suppressed("buy_now", block),
        };

        let Some(navigator) = self.navigator.as_mut() else {
            self.logger
                .debug_builder("no collaborator registered")
                .field("action", "buy_now")
                .emit();
            return ActionOutcome::NoCollaborator;
        };

        let path = intent.path.clone();
        navigator.navigate(intent);
        self.logger
            .info_builder("buy now emitted")
            .field("path", path)
            .emit();
        ActionOutcome::Emitted
    }

    fn initialize_selection(&mut self) {
        self.selection.initialize(&self.listing.variants);
        self.logger
            .debug_builder("selection initialized")
            .field("variant_id", self.selection.selected_id())
            .field_bool("has_variants", self.listing.has_variants())
            .emit();
    }

    fn suppressed(&self, action: &str, block: CtaBlock) -> ActionOutcome {
        self.logger
            .debug_builder("action suppressed")
            .field("action", action)
            .field("reason", block.as_str())
            .emit();
        ActionOutcome::Suppressed(block)
    }
}

impl std::fmt::Debug for ProductCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductCard")
            .field("listing", &self.listing)
            .field("selection", &self.selection)
            .field("locale", &self.locale)
            .field("product_path_prefix", &self.product_path_prefix)
            .field("has_cart", &self.cart.is_some())
            .field("has_navigator", &self.navigator.is_some())
            .finish()
    }
}

fn context_for(listing: &ProductListing) -> CardContext {
    CardContext::new(listing.id.as_str()).with_name(listing.name.as_str())
}

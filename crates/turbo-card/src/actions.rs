//! Payloads emitted by the card's call-to-action controls.

use serde::{Deserialize, Serialize};

use crate::catalog::ProductListing;
use crate::ids::{ProductId, VariantId};
use crate::selection::{cta_block, CtaBlock, SelectionState};

/// Path prefix of the product detail view.
pub const DEFAULT_PRODUCT_PATH_PREFIX: &str = "/product";

/// Emitted when "Add to Cart" is activated on an enabled card.
///
/// `variant_id` is present exactly when the listing has variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartIntent {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
}

/// Emitted when "Buy Now" is activated on an enabled card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationIntent {
    pub product_id: ProductId,
    /// Product detail path, e.g. `/product/p1`.
    pub path: String,
}

impl NavigationIntent {
    pub fn new(product_id: ProductId, path_prefix: &str) -> Self {
        let path = format!("{}/{}", path_prefix.trim_end_matches('/'), product_id);
        Self { product_id, path }
    }
}

/// Receives add-to-cart payloads.
pub trait CartSink {
    fn add_to_cart(&mut self, intent: AddToCartIntent);
}

impl<F> CartSink for F
where
    F: FnMut(AddToCartIntent),
{
    fn add_to_cart(&mut self, intent: AddToCartIntent) {
        self(intent)
    }
}

/// Performs navigation to a product detail view.
pub trait Navigator {
    fn navigate(&mut self, intent: NavigationIntent);
}

impl<F> Navigator for F
where
    F: FnMut(NavigationIntent),
{
    fn navigate(&mut self, intent: NavigationIntent) {
        self(intent)
    }
}

/// What happened when a call-to-action was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The payload was handed to the collaborator.
    Emitted,
    /// The control is disabled; nothing was built or sent.
    Suppressed(CtaBlock),
    /// The control is enabled but nobody is listening.
    NoCollaborator,
}

/// Build the add-to-cart payload, or report why the CTA is disabled.
pub fn build_add_to_cart(
    listing: &ProductListing,
    selection: &SelectionState,
) -> Result<AddToCartIntent, CtaBlock> {
    if let Some(block) = cta_block(listing, selection) {
        return Err(block);
    }

    let variant_id = listing
        .has_variants()
        .then(|| VariantId::new(selection.selected_id()));

    Ok(AddToCartIntent {
        product_id: listing.id.clone(),
        variant_id,
    })
}

/// Build the buy-now navigation intent, or report why the CTA is disabled.
pub fn build_buy_now(
    listing: &ProductListing,
    selection: &SelectionState,
    path_prefix: &str,
) -> Result<NavigationIntent, CtaBlock> {
    if let Some(block) = cta_block(listing, selection) {
        return Err(block);
    }
    Ok(NavigationIntent::new(listing.id.clone(), path_prefix))
}

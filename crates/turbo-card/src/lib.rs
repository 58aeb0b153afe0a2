//! Product card presentation state for TurboCommerce storefronts.
//!
//! A product card shows one product's image, name, price, stock status and
//! variant selector, plus "Add to Cart" and "Buy Now" controls. This crate
//! holds everything a renderer needs that is not markup:
//!
//! - **Format**: locale-aware price labels with a fixed `$` fallback
//! - **Selection**: initial variant choice and user selection
//! - **Actions**: add-to-cart and navigation payloads, gated on stock
//! - **Card**: a controller tying the above to one listing
//!
//! # Example
//!
//! ```rust
//! use turbo_card::prelude::*;
//!
//! let listing = ProductListing::new("p1", "Tee", 19.5)
//!     .with_stock(true)
//!     .with_variants(vec![
//!         Variant::new("s", "Small").with_disabled(true),
//!         Variant::new("m", "Medium"),
//!     ]);
//!
//! let config = CardConfig::default().with_locale("en-US");
//! let mut card = ProductCard::new(listing, &config)
//!     .with_cart(|intent: AddToCartIntent| println!("added {:?}", intent));
//!
//! assert_eq!(card.price_label(), "$19.50");
//! assert_eq!(card.selected_variant_id(), "m");
//! assert_eq!(card.add_to_cart(), ActionOutcome::Emitted);
//! ```

pub mod error;
pub mod ids;
pub mod currency;

pub mod actions;
pub mod card;
pub mod catalog;
pub mod config;
pub mod format;
pub mod selection;

pub use card::{CardView, ProductCard, Rebind};
pub use catalog::{ProductListing, Variant};
pub use config::CardConfig;
pub use error::{CardError, FormatError};
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CardError, FormatError};
    pub use crate::ids::*;

    pub use crate::actions::{
        build_add_to_cart, build_buy_now, ActionOutcome, AddToCartIntent, CartSink,
        NavigationIntent, Navigator,
    };
    pub use crate::card::{CardView, ProductCard, Rebind, VariantOptionView};
    pub use crate::catalog::{ProductListing, Variant};
    pub use crate::config::CardConfig;
    pub use crate::currency::Currency;
    pub use crate::format::{format_price, price_label, Locale, PriceLabel};
    pub use crate::selection::{
        cta_block, initial_variant_id, is_cta_disabled, CtaBlock, DisabledVariantPolicy,
        SelectionState,
    };
}

//! Leptos rendering of the TurboCommerce product card.
//!
//! ```rust,ignore
//! use leptos::prelude::*;
//! use turbo_card::prelude::*;
//! use turbo_card_view::ProductCard;
//!
//! let listing = ProductListing::new("p1", "Tee", 19.5).with_stock(true);
//! view! {
//!     <ProductCard
//!         listing=listing
//!         on_add_to_cart=move |intent: AddToCartIntent| log!("{:?}", intent)
//!     />
//! }
//! ```

mod product_card;

pub use product_card::{buy_now_class, stock_badge_class, CardState, ProductCard, ProductCardProps};

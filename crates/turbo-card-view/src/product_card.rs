//! Product card component.

use leptos::callback::{Callable, Callback};
use leptos::prelude::*;
use turbo_card::actions::{
    build_add_to_cart, build_buy_now, AddToCartIntent, NavigationIntent,
    DEFAULT_PRODUCT_PATH_PREFIX,
};
use turbo_card::card::CardView;
use turbo_card::catalog::ProductListing;
use turbo_card::format::Locale;
use turbo_card::selection::{BoundSelection, CtaBlock};

/// Classes for the "Buy Now" button. A disabled card keeps the button
/// clickable but styled as disabled; the click itself is suppressed.
pub fn buy_now_class(cta_disabled: bool) -> &'static str {
    if cta_disabled {
        "btn btn-outline-primary w-50 disabled"
    } else {
        "btn btn-outline-primary w-50"
    }
}

pub fn stock_badge_class(in_stock: bool) -> &'static str {
    if in_stock {
        "badge text-bg-success"
    } else {
        "badge text-bg-secondary"
    }
}

/// Reactive state behind one rendered card.
///
/// The selection is stored with the listing it was made for and read back
/// through [`BoundSelection::current`], so switching `listing` to another
/// product re-initializes the selection in the same read that sees the new
/// product.
#[derive(Clone, Copy)]
pub struct CardState {
    listing: Signal<ProductListing>,
    selection: RwSignal<BoundSelection>,
    view: Memo<CardView>,
}

impl CardState {
    pub fn new(listing: Signal<ProductListing>, locale: Locale) -> Self {
        let selection = RwSignal::new(listing.with_untracked(BoundSelection::new));
        let view = Memo::new(move |_| {
            listing.with(|l| selection.with(|s| CardView::derive(l, &s.current(l), &locale)))
        });
        Self {
            listing,
            selection,
            view,
        }
    }

    pub fn view(&self) -> Memo<CardView> {
        self.view
    }

    /// The user picked `id` in the selector.
    pub fn select(&self, id: String) {
        let listing = self.listing;
        self.selection
            .update(|s| listing.with_untracked(|l| s.select(l, id)));
    }

    pub fn add_to_cart_intent(&self) -> Result<AddToCartIntent, CtaBlock> {
        let selection = self.selection;
        self.listing.with_untracked(|l| {
            selection.with_untracked(|s| build_add_to_cart(l, &s.current(l)))
        })
    }

    pub fn buy_now_intent(&self, path_prefix: &str) -> Result<NavigationIntent, CtaBlock> {
        let selection = self.selection;
        self.listing.with_untracked(|l| {
            selection.with_untracked(|s| build_buy_now(l, &s.current(l), path_prefix))
        })
    }
}

/// A product card with variant selector and call-to-action buttons.
///
/// `listing` may be a signal; when it switches to a different product (or a
/// different variant list) the selection is re-initialized. `locale`
/// defaults to the runtime's own locale.
#[component]
pub fn ProductCard(
    #[prop(into)] listing: Signal<ProductListing>,
    #[prop(optional)] locale: Option<Locale>,
    #[prop(optional, into)] product_path_prefix: Option<String>,
    #[prop(optional, into)] on_add_to_cart: Option<Callback<AddToCartIntent>>,
    #[prop(optional, into)] on_buy_now: Option<Callback<NavigationIntent>>,
) -> impl IntoView {
    let locale = locale.unwrap_or_default();
    let path_prefix =
        product_path_prefix.unwrap_or_else(|| DEFAULT_PRODUCT_PATH_PREFIX.to_string());

    let state = CardState::new(listing, locale);
    let card = state.view();

    let on_add = move |_| {
        if let (Ok(intent), Some(callback)) = (state.add_to_cart_intent(), on_add_to_cart) {
            callback.run(intent);
        }
    };

    let on_buy = move |_| {
        if let (Ok(intent), Some(callback)) = (state.buy_now_intent(&path_prefix), on_buy_now) {
            callback.run(intent);
        }
    };

    view! {
        <div class="card h-100 shadow-sm border-0">
            <div class="ratio ratio-4x3 bg-light">
                <img
                    src=move || card.with(|c| c.image_url.clone())
                    alt=move || card.with(|c| c.name.clone())
                    class="card-img-top"
                    style="object-fit: contain;"
                    loading="lazy"
                />
            </div>

            <div class="card-body d-flex flex-column">
                <h5 class="card-title mb-2 text-truncate" title=move || card.with(|c| c.name.clone())>
                    {move || card.with(|c| c.name.clone())}
                </h5>

                <div class="d-flex align-items-center justify-content-between mb-3">
                    <span class="fw-semibold">{move || card.with(|c| c.price_label.clone())}</span>
                    <span class=move || stock_badge_class(card.with(|c| c.in_stock))>
                        {move || card.with(|c| c.stock_label)}
                    </span>
                </div>

                <Show when=move || card.with(|c| c.has_variants)>
                    <VariantSelect state=state/>
                </Show>

                <div class="mt-auto d-flex gap-2">
                    <button
                        type="button"
                        class="btn btn-primary w-50"
                        disabled=move || card.with(|c| c.cta_disabled)
                        on:click=on_add
                    >
                        {move || card.with(|c| c.add_to_cart_label)}
                    </button>

                    <button
                        type="button"
                        class=move || buy_now_class(card.with(|c| c.cta_disabled))
                        on:click=on_buy
                    >
                        "Buy Now"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn VariantSelect(state: CardState) -> impl IntoView {
    let card = state.view();
    let selector_id = move || card.with(|c| c.selector_id.clone());

    view! {
        <div class="mb-3">
            <label for=selector_id class="form-label mb-1">
                "Variant"
            </label>
            <select
                id=selector_id
                class="form-select"
                aria-label="Choose a variant"
                disabled=move || card.with(|c| c.selector_disabled)
                prop:value=move || card.with(|c| c.selected_variant_id.clone())
                on:change=move |ev| state.select(event_target_value(&ev))
            >
                {move || {
                    card.with(|c| {
                        c.options
                            .iter()
                            .map(|option| {
                                view! {
                                    <option
                                        value=option.id.clone()
                                        disabled=option.disabled
                                        selected=option.selected
                                    >
                                        {option.label.clone()}
                                    </option>
                                }
                            })
                            .collect::<Vec<_>>()
                    })
                }}
            </select>
        </div>
    }
}

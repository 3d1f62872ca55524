//! Cart mutation and display commands.
//!
//! # Usage
//!
//! ```bash
//! wasi-cart add -i combo1 -n "Combo Familiar" -p 89.90
//! wasi-cart set combo1 2
//! wasi-cart remove combo1
//! wasi-cart clear
//! ```

use std::fmt::Write;

use wasi_cart_core::{Cart, KeyValueStore, Locale, NewItem, ValidationError};
use wasi_cart_storefront::views::{CartView, added_notice};

/// Add one unit of an item described by raw attributes.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the id is empty or the price is not a
/// number between zero and [`wasi_cart_core::Price::MAX`].
pub fn add<S: KeyValueStore>(
    cart: &mut Cart<S>,
    locale: Locale,
    id: &str,
    name: &str,
    price: &str,
) -> Result<String, ValidationError> {
    let item = NewItem::parse(id, name, price)?;
    cart.add_item(item);
    Ok(added_notice(name, locale))
}

/// Remove an item. The cart is saved and re-rendered even if `id` is absent.
pub fn remove<S: KeyValueStore>(cart: &mut Cart<S>, id: &str) -> String {
    let present = cart.get(id).is_some();
    cart.remove_item(id);
    if present {
        format!("Removed `{id}`")
    } else {
        not_in_cart(id)
    }
}

/// Set an item's quantity.
pub fn set<S: KeyValueStore>(cart: &mut Cart<S>, id: &str, quantity: i64) -> String {
    if quantity < 1 {
        return remove(cart, id);
    }
    if cart.get(id).is_none() {
        return not_in_cart(id);
    }
    cart.update_quantity(id, quantity);
    cart.get(id).map_or_else(
        || not_in_cart(id),
        |item| format!("`{id}` quantity set to {}", item.quantity),
    )
}

/// Add one unit to an item already in the cart.
pub fn increment<S: KeyValueStore>(cart: &mut Cart<S>, id: &str) -> String {
    if cart.get(id).is_none() {
        return not_in_cart(id);
    }
    cart.increment(id);
    quantity_line(cart, id)
}

/// Take one unit from an item.
pub fn decrement<S: KeyValueStore>(cart: &mut Cart<S>, id: &str) -> String {
    if cart.get(id).is_none() {
        return not_in_cart(id);
    }
    cart.decrement(id);
    quantity_line(cart, id)
}

/// Empty the cart.
pub fn clear<S: KeyValueStore>(cart: &mut Cart<S>) -> String {
    cart.clear();
    "Cart cleared".to_string()
}

/// Plain-text rendering of the cart.
#[must_use]
pub fn render(view: &CartView) -> String {
    if view.is_empty() {
        return "Cart is empty".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Cart ({} items)", view.item_count);
    for item in &view.items {
        let _ = writeln!(
            out,
            "  {:>3}x {:<28} {:>12}  [{}]",
            item.quantity, item.name, item.line_price, item.id
        );
    }
    let _ = writeln!(out, "Subtotal: {}", view.subtotal);
    let _ = writeln!(out, "Delivery: {}", view.delivery);
    let _ = write!(out, "Total:    {}", view.total);
    if let Some(remaining) = &view.remaining_for_free_delivery {
        let _ = write!(out, "\nAdd {remaining} more for free delivery");
    }
    out
}

fn not_in_cart(id: &str) -> String {
    format!("No item `{id}` in cart")
}

fn quantity_line<S: KeyValueStore>(cart: &Cart<S>, id: &str) -> String {
    cart.get(id).map_or_else(
        || format!("Removed `{id}`"),
        |item| format!("`{id}` quantity is now {}", item.quantity),
    )
}

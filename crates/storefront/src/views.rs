//! Cart display data.
//!
//! Everything here is derived from a [`CartSummary`]; nothing writes back to
//! the cart.

use serde::Serialize;
use wasi_cart_core::{CartItem, CartSummary, Locale, MessageLabels, format_amount};

/// Photo shown for items without a dedicated one.
pub const DEFAULT_IMAGE: &str = "imagenes/platos/default.jpg";

/// Dish and combo photos by menu id.
const ITEM_IMAGES: &[(&str, &str)] = &[
    ("1", "imagenes/platos/lomo-saltado.jpg"),
    ("2", "imagenes/platos/aji-gallina.jpg"),
    ("3", "imagenes/platos/ceviche.jpg"),
    ("4", "imagenes/platos/seco-res.jpg"),
    ("5", "imagenes/platos/causa.jpg"),
    ("6", "imagenes/platos/papa-huancaina.jpg"),
    ("7", "imagenes/bebidas/chicha-morada.jpg"),
    ("8", "imagenes/bebidas/inca-kola.jpg"),
    ("combo1", "imagenes/combos/combo-familiar.jpg"),
    ("combo2", "imagenes/combos/combo-parejas.jpg"),
    ("combo3", "imagenes/combos/combo-criollo.jpg"),
];

/// Image path for a menu id.
#[must_use]
pub fn item_image(id: &str) -> &'static str {
    ITEM_IMAGES
        .iter()
        .find(|(key, _)| *key == id)
        .map_or(DEFAULT_IMAGE, |&(_, path)| path)
}

/// Toast text shown after an item is added.
#[must_use]
pub fn added_notice(name: &str, locale: Locale) -> String {
    match locale {
        Locale::Es => format!("{name} agregado al carrito"),
        Locale::En => format!("{name} added to cart"),
    }
}

/// Cart item display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: &'static str,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            quantity: item.quantity,
            price: format_amount(item.price.amount()),
            line_price: format_amount(item.line_total()),
            image: item_image(item.id.as_str()),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    /// Delivery amount, or the free marker when waived.
    pub delivery: String,
    pub free_delivery: bool,
    pub total: String,
    /// Units across all lines; drives the header and floating badges.
    pub item_count: u64,
    /// Amount still needed for free delivery, when not yet reached.
    pub remaining_for_free_delivery: Option<String>,
}

impl CartView {
    /// Build display data from a snapshot.
    #[must_use]
    pub fn new(summary: &CartSummary, labels: &MessageLabels) -> Self {
        let totals = &summary.totals;
        let free_delivery = totals.is_free_delivery();
        let remaining = totals.remaining_for_free_delivery();

        Self {
            items: summary.items.iter().map(CartItemView::from).collect(),
            subtotal: format_amount(totals.subtotal),
            delivery: if free_delivery {
                labels.free.to_string()
            } else {
                format_amount(totals.delivery)
            },
            free_delivery,
            total: format_amount(totals.total),
            item_count: summary.item_count(),
            remaining_for_free_delivery: (!remaining.is_zero()).then(|| format_amount(remaining)),
        }
    }

    /// Whether the empty-cart placeholder should be shown instead of the summary.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the floating cart button is visible.
    #[must_use]
    pub const fn show_badge(&self) -> bool {
        self.item_count > 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use wasi_cart_core::{Cart, CartStorage, MemoryStore, NewItem, PricingPolicy};

    use super::*;

    fn view_of(items: &[(&str, &str, &str)]) -> CartView {
        let mut cart = Cart::new(CartStorage::new(MemoryStore::new()), PricingPolicy::default());
        for (id, name, price) in items {
            cart.add_item(NewItem::parse(id, name, price).unwrap());
        }
        CartView::new(&cart.summary(), &MessageLabels::SPANISH)
    }

    #[test]
    fn test_item_image() {
        assert_eq!(item_image("3"), "imagenes/platos/ceviche.jpg");
        assert_eq!(item_image("combo2"), "imagenes/combos/combo-parejas.jpg");
        assert_eq!(item_image("99"), DEFAULT_IMAGE);
    }

    #[test]
    fn test_added_notice() {
        assert_eq!(added_notice("Ceviche", Locale::Es), "Ceviche agregado al carrito");
        assert_eq!(added_notice("Ceviche", Locale::En), "Ceviche added to cart");
    }

    #[test]
    fn test_empty_view() {
        let view = view_of(&[]);
        assert!(view.is_empty());
        assert!(!view.show_badge());
        assert_eq!(view.subtotal, "S/ 0.00");
        assert_eq!(view.delivery, "S/ 5.00");
        assert_eq!(view.total, "S/ 5.00");
    }

    #[test]
    fn test_view_free_delivery() {
        let view = view_of(&[("1", "Lomo Saltado", "25"), ("1", "Lomo Saltado", "25"), ("8", "Inca Kola", "4.5")]);

        assert_eq!(view.item_count, 3);
        assert!(view.show_badge());
        assert_eq!(view.items[0].quantity, 2);
        assert_eq!(view.items[0].price, "S/ 25.00");
        assert_eq!(view.items[0].line_price, "S/ 50.00");
        assert_eq!(view.items[0].image, "imagenes/platos/lomo-saltado.jpg");
        assert_eq!(view.subtotal, "S/ 54.50");
        assert_eq!(view.delivery, "GRATIS");
        assert!(view.free_delivery);
        assert_eq!(view.total, "S/ 54.50");
        assert_eq!(view.remaining_for_free_delivery, None);
    }

    #[test]
    fn test_view_below_threshold() {
        let view = view_of(&[("3", "Ceviche", "30")]);

        assert_eq!(view.delivery, "S/ 5.00");
        assert!(!view.free_delivery);
        assert_eq!(view.total, "S/ 35.00");
        assert_eq!(view.remaining_for_free_delivery.as_deref(), Some("S/ 20.00"));
    }
}

//! The cart store.
//!
//! [`Cart`] is the single authority over what the shopper has selected. It
//! keeps items in insertion order, enforces one entry per id and a quantity
//! floor of one, saves after every change and then tells its observers that
//! something changed. Observers get no payload; they read whatever they need
//! back from the cart.

use core::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::pricing::{PricingPolicy, Totals};
use crate::storage::{CartStorage, KeyValueStore};
use crate::types::{CartItem, MAX_QUANTITY, NewItem, ValidationError};

type Observer = Box<dyn FnMut() + Send>;

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Change callbacks, run in registration order.
#[derive(Default)]
pub struct Observers {
    entries: Vec<(SubscriptionId, Observer)>,
    next: u64,
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl Observers {
    /// An empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next: 0,
        }
    }

    /// Register a callback.
    pub fn subscribe(&mut self, observer: impl FnMut() + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.entries.push((id, Box::new(observer)));
        id
    }

    /// Drop a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    /// Run every callback once.
    pub fn notify(&mut self) {
        for (_, observer) in &mut self.entries {
            observer();
        }
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no callback is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Owned, read-only copy of the cart for rendering and message formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub totals: Totals,
}

impl CartSummary {
    /// Total number of units across all entries.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The shopping cart.
pub struct Cart<S> {
    items: Vec<CartItem>,
    policy: PricingPolicy,
    storage: CartStorage<S>,
    observers: Observers,
}

impl<S: fmt::Debug> fmt::Debug for Cart<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart")
            .field("items", &self.items)
            .field("policy", &self.policy)
            .field("storage", &self.storage)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> Cart<S> {
    /// Create an empty cart. Nothing is read from storage.
    #[must_use]
    pub const fn new(storage: CartStorage<S>, policy: PricingPolicy) -> Self {
        Self {
            items: Vec::new(),
            policy,
            storage,
            observers: Observers::new(),
        }
    }

    /// Create a cart holding whatever was previously saved.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the stored cart contains an invalid
    /// entry. An absent or unparsable stored value yields an empty cart.
    pub fn restore(storage: CartStorage<S>, policy: PricingPolicy) -> Result<Self, ValidationError> {
        let mut cart = Self::new(storage, policy);
        cart.reload()?;
        Ok(cart)
    }

    /// Replace the in-memory items with the stored ones and notify observers.
    ///
    /// On error the current items are left untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the stored cart contains an invalid entry.
    pub fn reload(&mut self) -> Result<(), ValidationError> {
        self.items = self.storage.load()?;
        info!(count = self.items.len(), "Cart restored");
        self.notify();
        Ok(())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `item`.
    ///
    /// An existing entry with the same id gains one unit, up to
    /// [`MAX_QUANTITY`], and keeps the name and price it was first added with.
    pub fn add_item(&mut self, item: NewItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            if existing.quantity < MAX_QUANTITY {
                existing.quantity += 1;
                info!(id = %existing.id, quantity = existing.quantity, "Cart item incremented");
            } else {
                warn!(id = %existing.id, max = MAX_QUANTITY, "Cart item already at maximum quantity");
            }
        } else {
            info!(id = %item.id, name = %item.name, "Cart item added");
            self.items.push(CartItem::from_new(item));
        }
        self.commit();
    }

    /// Remove the entry with `id`. A missing id is not an error, but observers
    /// are still notified.
    pub fn remove_item(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|i| i.id.as_str() != id);
        if self.items.len() == before {
            debug!(id, "Remove of absent cart item");
        } else {
            info!(id, "Cart item removed");
        }
        self.commit();
    }

    /// Set the quantity of the entry with `id`.
    ///
    /// A quantity below one removes the entry; one above [`MAX_QUANTITY`] is
    /// clamped to it. Setting a quantity on an id that is not in the cart does
    /// nothing and notifies nobody.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) {
        if quantity < 1 {
            self.remove_item(id);
            return;
        }

        let Some(item) = self.items.iter_mut().find(|i| i.id.as_str() == id) else {
            debug!(id, quantity, "Quantity update for absent cart item ignored");
            return;
        };
        item.quantity = match u32::try_from(quantity) {
            Ok(q) if q <= MAX_QUANTITY => q,
            _ => {
                warn!(id, requested = quantity, max = MAX_QUANTITY, "Cart item quantity clamped");
                MAX_QUANTITY
            }
        };
        info!(id, quantity = item.quantity, "Cart item quantity updated");
        self.commit();
    }

    /// Add one unit to an existing entry. No-op if `id` is absent.
    pub fn increment(&mut self, id: &str) {
        if let Some(quantity) = self.quantity_of(id) {
            self.update_quantity(id, i64::from(quantity) + 1);
        }
    }

    /// Take one unit from an existing entry, removing it at zero. No-op if
    /// `id` is absent.
    pub fn decrement(&mut self, id: &str) {
        if let Some(quantity) = self.quantity_of(id) {
            self.update_quantity(id, i64::from(quantity) - 1);
        }
    }

    /// Empty the cart. Always saves and notifies, even when already empty.
    pub fn clear(&mut self) {
        self.items.clear();
        info!("Cart cleared");
        self.commit();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The entry with `id`, if present.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id.as_str() == id)
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all entries.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of `price × quantity` over all entries.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Delivery charge for the current subtotal.
    #[must_use]
    pub fn delivery(&self) -> Decimal {
        self.policy.delivery_for(self.subtotal())
    }

    /// Subtotal plus delivery.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.totals().total
    }

    /// Subtotal, delivery and total together.
    #[must_use]
    pub fn totals(&self) -> Totals {
        self.policy.totals_for(self.subtotal())
    }

    /// The pricing policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Snapshot for the presentation layer.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            items: self.items.clone(),
            totals: self.totals(),
        }
    }

    /// The persistence adapter.
    #[must_use]
    pub const fn storage(&self) -> &CartStorage<S> {
        &self.storage
    }

    /// Save one last time and give back the persistence adapter.
    #[must_use]
    pub fn into_storage(mut self) -> CartStorage<S> {
        self.persist();
        self.storage
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Register a callback run after every change.
    pub fn subscribe(&mut self, observer: impl FnMut() + Send + 'static) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    /// Drop a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn quantity_of(&self, id: &str) -> Option<u32> {
        self.get(id).map(|i| i.quantity)
    }

    fn commit(&mut self) {
        self.persist();
        self.notify();
    }

    fn persist(&mut self) {
        if let Err(e) = self.storage.save(&self.items) {
            warn!(error = %e, "Failed to save cart");
        }
    }

    fn notify(&mut self) {
        self.observers.notify();
    }
}

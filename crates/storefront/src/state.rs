//! Cart ownership for hosts.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use wasi_cart_core::{
    Cart, CartStorage, CartSummary, KeyValueStore, MessageLabels, Observers, SubscriptionId,
};

use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::store::FileStore;
use crate::views::CartView;

/// Open the configured file store and restore the saved cart.
///
/// # Errors
///
/// Returns an error if the store directory cannot be created or the saved
/// cart holds an invalid entry.
pub fn open_cart(config: &StorefrontConfig) -> Result<Cart<FileStore>> {
    let store = FileStore::open(&config.cart_dir)?;
    let cart = Cart::restore(CartStorage::new(store), config.pricing)?;
    Ok(cart)
}

/// Open the configured file store without reading the saved cart.
///
/// Used to recover from a corrupt saved cart: clearing the returned cart
/// overwrites it.
///
/// # Errors
///
/// Returns an error if the store directory cannot be created.
pub fn open_empty_cart(config: &StorefrontConfig) -> Result<Cart<FileStore>> {
    let store = FileStore::open(&config.cart_dir)?;
    Ok(Cart::new(CartStorage::new(store), config.pricing))
}

/// Shared cart for hosts that touch it from more than one thread.
///
/// This struct is cheaply cloneable via `Arc`. Every operation holds the one
/// lock for its whole duration, so mutations never interleave.
///
/// Observers registered with [`CartHandle::subscribe`] run after the lock is
/// released, so they may read the cart back through a clone of the handle.
/// They must not mutate it from inside the callback. Observers registered on
/// the inner [`Cart`] still run under the lock.
pub struct CartHandle<S> {
    inner: Arc<Mutex<Cart<S>>>,
    observers: Arc<Mutex<Observers>>,
    pending: Arc<AtomicUsize>,
}

impl<S> Clone for CartHandle<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            observers: Arc::clone(&self.observers),
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<S: KeyValueStore> CartHandle<S> {
    /// Take ownership of a cart.
    #[must_use]
    pub fn new(mut cart: Cart<S>) -> Self {
        let pending = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&pending);
        cart.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        Self {
            inner: Arc::new(Mutex::new(cart)),
            observers: Arc::new(Mutex::new(Observers::new())),
            pending,
        }
    }

    /// Run `f` with exclusive access to the cart, then notify handle
    /// observers once per change `f` made.
    pub fn with<R>(&self, f: impl FnOnce(&mut Cart<S>) -> R) -> R {
        let (result, changes) = {
            let mut cart = self.inner.lock();
            let result = f(&mut cart);
            // Only this call can have bumped the counter while the lock is held.
            (result, self.pending.swap(0, Ordering::SeqCst))
        };

        if changes > 0 {
            let mut observers = self.observers.lock();
            for _ in 0..changes {
                observers.notify();
            }
        }
        result
    }

    /// Register a callback run after every change made through this handle
    /// or any of its clones.
    pub fn subscribe(&self, observer: impl FnMut() + Send + 'static) -> SubscriptionId {
        self.observers.lock().subscribe(observer)
    }

    /// Drop a callback. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.lock().unsubscribe(id)
    }

    /// Snapshot of the current contents.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.inner.lock().summary()
    }

    /// Display data for the current contents.
    #[must_use]
    pub fn view(&self, labels: &MessageLabels) -> CartView {
        CartView::new(&self.summary(), labels)
    }
}

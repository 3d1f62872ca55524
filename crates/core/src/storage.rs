//! Durable cart persistence.
//!
//! The cart is stored as a JSON array of `{id, name, price, quantity}` records
//! under a single fixed key. Where the bytes live is up to the host: anything
//! that implements [`KeyValueStore`] will do.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::types::{CartItem, MAX_QUANTITY, StoredItem, ValidationError};

/// Key under which the cart is stored.
pub const CART_STORAGE_KEY: &str = "wasiCart";

/// Errors from the underlying key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The cart could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The store refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A local string key-value store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the value cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be modified.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process store backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a single pre-existing entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_owned(), value.to_owned());
        Self { entries }
    }

    /// Raw value under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Loads and saves the cart item list through a [`KeyValueStore`].
#[derive(Debug)]
pub struct CartStorage<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartStorage<S> {
    /// Persist under [`CART_STORAGE_KEY`].
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, CART_STORAGE_KEY)
    }

    /// Persist under a custom key.
    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The key the cart is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the backing store.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Write the item list.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if encoding or writing fails.
    pub fn save(&mut self, items: &[CartItem]) -> Result<(), StorageError> {
        let json = serde_json::to_string(items)?;
        self.store.set(&self.key, &json)?;
        debug!(key = %self.key, count = items.len(), "cart saved");
        Ok(())
    }

    /// Read the item list.
    ///
    /// A missing key, an unreadable store or a value that is not a JSON array
    /// of item records all yield an empty list; the latter two are logged.
    /// Entries sharing an id are merged into the first one, capped at
    /// [`MAX_QUANTITY`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::StoredEntry`] if a well-formed record holds
    /// an invalid value (non-numeric price, quantity below one, empty id).
    pub fn load(&self) -> Result<Vec<CartItem>, ValidationError> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(Vec::new()),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Cart storage unavailable, starting empty");
                return Ok(Vec::new());
            }
        };

        let stored: Vec<StoredItem> = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored cart is corrupt, starting empty");
                return Ok(Vec::new());
            }
        };

        let mut items: Vec<CartItem> = Vec::with_capacity(stored.len());
        for (index, entry) in stored.into_iter().enumerate() {
            let item = entry
                .validate()
                .map_err(|source| ValidationError::StoredEntry {
                    index,
                    source: Box::new(source),
                })?;

            if let Some(existing) = items.iter_mut().find(|i| i.id == item.id) {
                warn!(id = %item.id, "Merging duplicate stored cart entry");
                existing.quantity = existing.quantity.saturating_add(item.quantity).min(MAX_QUANTITY);
            } else {
                items.push(item);
            }
        }

        debug!(key = %self.key, count = items.len(), "cart loaded");
        Ok(items)
    }

    /// Delete the stored cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be modified.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{ItemId, NewItem, Price};

    /// Store whose every operation fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }
    }

    fn item(id: &str, name: &str, price: &str, quantity: u32) -> CartItem {
        let mut item = CartItem::from_new(NewItem::parse(id, name, price).unwrap());
        item.quantity = quantity;
        item
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let storage = CartStorage::new(MemoryStore::new());
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let items = vec![
            item("1", "Lomo Saltado", "25.00", 2),
            item("combo1", "Combo Familiar", "89.90", 1),
        ];
        let mut storage = CartStorage::new(MemoryStore::new());
        storage.save(&items).unwrap();

        assert_eq!(storage.load().unwrap(), items);
    }

    #[test]
    fn test_save_writes_json_array_under_fixed_key() {
        let mut storage = CartStorage::new(MemoryStore::new());
        storage.save(&[item("8", "Inca Kola", "5", 3)]).unwrap();

        let raw = storage.store().raw(CART_STORAGE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"id": "8", "name": "Inca Kola", "price": "5", "quantity": 3}])
        );
    }

    #[test]
    fn test_load_corrupt_value_is_empty() {
        for raw in ["{not json", "", "null", r#"{"id":"1"}"#, r#"[{"name":"x"}]"#] {
            let storage = CartStorage::new(MemoryStore::with_entry(CART_STORAGE_KEY, raw));
            assert!(storage.load().unwrap().is_empty(), "{raw}");
        }
    }

    #[test]
    fn test_load_unavailable_store_is_empty() {
        let storage = CartStorage::new(BrokenStore);
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_unavailable_store_errors() {
        let mut storage = CartStorage::new(BrokenStore);
        assert!(matches!(
            storage.save(&[]),
            Err(StorageError::Unavailable(_))
        ));
    }

    #[test]
    fn test_load_legacy_records() {
        // Written by the page script: price as markup string, no quantity on one entry.
        let raw = r#"[
            {"id":"1","name":"Lomo Saltado","price":"25.00","quantity":2},
            {"id":"7","name":"Chicha Morada","price":6.5}
        ]"#;
        let storage = CartStorage::new(MemoryStore::with_entry(CART_STORAGE_KEY, raw));
        let items = storage.load().unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].quantity, 1);
        assert_eq!(items[1].price, Price::parse("6.5").unwrap());
    }

    #[test]
    fn test_load_invalid_price_is_reported() {
        let raw = r#"[
            {"id":"1","name":"Lomo Saltado","price":"25.00"},
            {"id":"2","name":"Ají de Gallina","price":"NaN"}
        ]"#;
        let storage = CartStorage::new(MemoryStore::with_entry(CART_STORAGE_KEY, raw));
        let err = storage.load().unwrap_err();

        assert!(matches!(err, ValidationError::StoredEntry { index: 1, .. }));
    }

    #[test]
    fn test_load_negative_quantity_is_reported() {
        let raw = r#"[{"id":"1","name":"Lomo Saltado","price":"25.00","quantity":-1}]"#;
        let storage = CartStorage::new(MemoryStore::with_entry(CART_STORAGE_KEY, raw));

        let Err(ValidationError::StoredEntry { source, .. }) = storage.load() else {
            panic!("expected a stored entry error");
        };
        assert!(matches!(*source, ValidationError::InvalidQuantity { quantity: -1, .. }));
    }

    #[test]
    fn test_load_merges_duplicate_ids() {
        let raw = r#"[
            {"id":"1","name":"Lomo Saltado","price":"25.00","quantity":2},
            {"id":"1","name":"Lomo","price":"99","quantity":3}
        ]"#;
        let storage = CartStorage::new(MemoryStore::with_entry(CART_STORAGE_KEY, raw));
        let items = storage.load().unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Lomo Saltado");
        assert_eq!(items[0].quantity, 5);
        assert_eq!(items[0].line_total(), Decimal::new(125, 0));
    }

    #[test]
    fn test_load_merge_caps_quantity() {
        let raw = r#"[
            {"id":"1","name":"Lomo Saltado","price":"25.00","quantity":9000},
            {"id":"1","name":"Lomo Saltado","price":"25.00","quantity":9000}
        ]"#;
        let storage = CartStorage::new(MemoryStore::with_entry(CART_STORAGE_KEY, raw));

        assert_eq!(storage.load().unwrap()[0].quantity, MAX_QUANTITY);
    }

    #[test]
    fn test_clear_removes_key() {
        let mut storage = CartStorage::new(MemoryStore::new());
        storage.save(&[item("3", "Ceviche", "30", 1)]).unwrap();
        storage.clear().unwrap();

        assert!(storage.store().raw(CART_STORAGE_KEY).is_none());
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_custom_key() {
        let mut storage = CartStorage::with_key(MemoryStore::new(), "otherCart");
        storage.save(&[item("3", "Ceviche", "30", 1)]).unwrap();

        assert_eq!(storage.key(), "otherCart");
        assert!(storage.store().raw(CART_STORAGE_KEY).is_none());
    }

    fn arb_item(index: usize) -> impl Strategy<Value = CartItem> {
        (
            "[a-z0-9]{0,6}",
            "\\PC{0,20}",
            0i64..=1_000_000,
            0u32..=4,
            1..=MAX_QUANTITY,
        )
            .prop_map(move |(suffix, name, units, scale, quantity)| CartItem {
                id: ItemId::new(format!("{index}{suffix}")),
                name,
                price: Price::from_decimal(Decimal::new(units, scale)).unwrap(),
                quantity,
            })
    }

    fn arb_items() -> impl Strategy<Value = Vec<CartItem>> {
        (0usize..8).prop_flat_map(|len| (0..len).map(arb_item).collect::<Vec<_>>())
    }

    proptest! {
        #[test]
        fn prop_save_then_load_round_trips(items in arb_items()) {
            let mut storage = CartStorage::new(MemoryStore::new());
            storage.save(&items).unwrap();

            prop_assert_eq!(storage.load().unwrap(), items);
        }
    }
}

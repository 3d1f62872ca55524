//! Cart entries and the validation applied at the cart boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ItemId, Price};

/// Most units of one item a cart entry may hold.
pub const MAX_QUANTITY: u32 = 9_999;

/// Errors raised when input or persisted data does not describe a valid item.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The item id is empty.
    #[error("item id cannot be empty")]
    EmptyId,
    /// The price is not a number.
    #[error("price `{0}` is not a number")]
    InvalidPrice(String),
    /// The price is below zero.
    #[error("price `{0}` cannot be negative")]
    NegativePrice(String),
    /// The price is above [`Price::MAX`].
    #[error("price `{0}` is above the maximum of {max}", max = Price::MAX)]
    PriceTooHigh(String),
    /// A stored quantity is zero, negative, or too large.
    #[error("quantity {quantity} for item `{id}` is out of range")]
    InvalidQuantity {
        /// Id of the offending entry.
        id: String,
        /// The stored quantity.
        quantity: i64,
    },
    /// A persisted cart entry failed validation.
    #[error("stored cart entry {index} is invalid: {source}")]
    StoredEntry {
        /// Position of the entry in the stored array.
        index: usize,
        /// What was wrong with it.
        source: Box<ValidationError>,
    },
}

/// A menu item the shopper asked to add.
///
/// This is what the page hands over from an "add to cart" button: identity,
/// display name and unit price. Quantity is owned by the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
}

impl NewItem {
    /// Create an item from already validated parts.
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    /// Validate raw markup attributes (`data-id`, `data-name`, `data-price`).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyId`] for an empty id, or a price error if
    /// `price` is not a non-negative number.
    pub fn parse(id: &str, name: &str, price: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: ItemId::parse(id)?,
            name: name.to_owned(),
            price: Price::parse(price)?,
        })
    }
}

/// One line of the cart.
///
/// Invariant: `1 <= quantity <= MAX_QUANTITY`. The cart removes an entry instead of letting
/// its quantity reach zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

impl CartItem {
    /// A fresh entry with quantity 1.
    #[must_use]
    pub fn from_new(item: NewItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            quantity: 1,
        }
    }

    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.times(self.quantity)
    }
}

/// A cart entry exactly as it was found in storage, before validation.
///
/// Decoding into this shape only checks structure. Unknown fields are ignored
/// and a missing `quantity` means one unit. Values are checked by
/// [`StoredItem::validate`], so a non-numeric price is reported as a
/// [`ValidationError`] rather than lost in a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price: serde_json::Value,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

const fn default_quantity() -> i64 {
    1
}

impl StoredItem {
    /// Check the stored values and build a cart entry.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an empty id, a price that is not a
    /// non-negative number up to [`Price::MAX`], or a quantity outside
    /// `1..=MAX_QUANTITY`.
    pub fn validate(self) -> Result<CartItem, ValidationError> {
        let id = ItemId::parse(&self.id)?;
        let price = match &self.price {
            serde_json::Value::String(s) => Price::parse(s)?,
            serde_json::Value::Number(n) => Price::parse(&n.to_string())?,
            other => return Err(ValidationError::InvalidPrice(other.to_string())),
        };
        let quantity = u32::try_from(self.quantity)
            .ok()
            .filter(|q| (1..=MAX_QUANTITY).contains(q))
            .ok_or_else(|| ValidationError::InvalidQuantity {
                id: self.id.clone(),
                quantity: self.quantity,
            })?;

        Ok(CartItem {
            id,
            name: self.name,
            price,
            quantity,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn stored(json: &str) -> StoredItem {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_new_item_parse() {
        let item = NewItem::parse("1", "Lomo Saltado", "25.00").unwrap();
        assert_eq!(item.id.as_str(), "1");
        assert_eq!(item.name, "Lomo Saltado");
        assert_eq!(item.price.amount(), Decimal::new(25, 0));
    }

    #[test]
    fn test_new_item_parse_rejects_bad_input() {
        assert_eq!(
            NewItem::parse("", "Causa", "12"),
            Err(ValidationError::EmptyId)
        );
        assert!(matches!(
            NewItem::parse("5", "Causa", "doce"),
            Err(ValidationError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_line_total() {
        let mut item = CartItem::from_new(NewItem::parse("2", "Ají de Gallina", "22.50").unwrap());
        assert_eq!(item.quantity, 1);
        item.quantity = 4;
        assert_eq!(item.line_total(), Decimal::new(90, 0));
    }

    #[test]
    fn test_stored_item_defaults_quantity() {
        let item = stored(r#"{"id":"3","name":"Ceviche","price":"30"}"#)
            .validate()
            .unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_stored_item_ignores_unknown_fields() {
        let item = stored(r#"{"id":"7","name":"Chicha Morada","price":6,"quantity":2,"img":"x.jpg"}"#)
            .validate()
            .unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price.amount(), Decimal::new(6, 0));
    }

    #[test]
    fn test_stored_item_rejects_bad_price() {
        let err = stored(r#"{"id":"3","name":"Ceviche","price":"gratis"}"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPrice(_)));

        let err = stored(r#"{"id":"3","name":"Ceviche","price":null}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidPrice("null".to_string()));
    }

    #[test]
    fn test_stored_item_accepts_max_quantity() {
        let item = stored(r#"{"id":"3","name":"Ceviche","price":"30","quantity":9999}"#)
            .validate()
            .unwrap();
        assert_eq!(item.quantity, MAX_QUANTITY);
    }

    #[test]
    fn test_stored_item_rejects_huge_price() {
        let err = stored(r#"{"id":"1","name":"Plato","price":1e20}"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::PriceTooHigh(_)));
    }

    #[test]
    fn test_stored_item_rejects_bad_quantity() {
        for quantity in ["0", "-2", "10000", "4294967295", "4294967296"] {
            let json = format!(r#"{{"id":"3","name":"Ceviche","price":"30","quantity":{quantity}}}"#);
            let err = stored(&json).validate().unwrap_err();
            assert!(matches!(err, ValidationError::InvalidQuantity { .. }), "{quantity}");
        }
    }

    #[test]
    fn test_stored_item_rejects_empty_id() {
        let err = stored(r#"{"id":"","name":"Ceviche","price":"30"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyId);
    }
}

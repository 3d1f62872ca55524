//! Menu item identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::item::ValidationError;

/// Identifier of a dish, drink or combo on the menu.
///
/// Ids come straight from page markup (`"1"`, `"combo2"`) so they are kept as
/// strings. The only constraint is that an id is never empty: the cart keys
/// every entry by it.
///
/// ## Examples
///
/// ```
/// use wasi_cart_core::ItemId;
///
/// assert!(ItemId::parse("combo1").is_ok());
/// assert!(ItemId::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Create an id from a value the caller guarantees is non-empty.
    ///
    /// # Panics
    ///
    /// Panics if `id` is empty. A missing id is a bug in the caller, not a
    /// recoverable runtime condition; use [`ItemId::parse`] for untrusted input.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        assert!(!id.is_empty(), "menu item id must not be empty");
        Self(id)
    }

    /// Parse an id from untrusted input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyId`] if the input is empty.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ItemId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(value))
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ids() {
        assert_eq!(ItemId::parse("1").unwrap().as_str(), "1");
        assert_eq!(ItemId::parse("combo3").unwrap().as_str(), "combo3");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(ItemId::parse(""), Err(ValidationError::EmptyId)));
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_new_empty_panics() {
        let _ = ItemId::new("");
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = ItemId::new("combo1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"combo1\"");

        let parsed: ItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<ItemId>("\"\"").is_err());
    }
}

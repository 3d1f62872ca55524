//! Core types for the WASI cart.
//!
//! This module provides validated wrappers for the values that enter the cart
//! from page markup or from persisted state.

pub mod id;
pub mod item;
pub mod price;

pub use id::ItemId;
pub use item::{CartItem, MAX_QUANTITY, NewItem, StoredItem, ValidationError};
pub use price::Price;

//! WASI Cart Core - cart state, pricing and order handoff.
//!
//! This crate provides the pieces of the ordering site that carry real
//! invariants:
//! - `storefront` - Presentation collaborator (views, checkout link, file store)
//! - `cli` - Command-line host driving the cart
//!
//! # Architecture
//!
//! The core crate contains types, the cart aggregate and pure formatting - no
//! filesystem, no network. Durable storage is reached through the
//! [`KeyValueStore`] trait so hosts decide where bytes live.
//!
//! # Modules
//!
//! - [`types`] - Validated item ids, prices and cart items
//! - [`pricing`] - Delivery policy and totals
//! - [`cart`] - The cart store with change notifications
//! - [`storage`] - Key-value store trait and the cart persistence adapter
//! - [`message`] - Order summary text for the messaging handoff

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod message;
pub mod pricing;
pub mod storage;
pub mod types;

pub use cart::{Cart, CartSummary, Observers, SubscriptionId};
pub use message::{Locale, MessageLabels, format_order_message};
pub use pricing::{PricingPolicy, Totals, format_amount};
pub use storage::{CART_STORAGE_KEY, CartStorage, KeyValueStore, MemoryStore, StorageError};
pub use types::*;

//! Integration tests for the WASI cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wasi-cart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Restore, mutate and reload through the file store
//! - `checkout_flow` - From menu clicks to the WhatsApp link

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use wasi_cart_storefront::config::StorefrontConfig;

/// Default configuration with the cart stored under `dir`.
#[must_use]
pub fn config_in(dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        cart_dir: dir.to_path_buf(),
        ..StorefrontConfig::default()
    }
}

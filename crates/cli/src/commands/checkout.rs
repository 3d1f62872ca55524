//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! # Print the order message
//! wasi-cart checkout
//!
//! # Print the click-to-chat link (open it in a browser)
//! wasi-cart checkout --link
//! ```

use wasi_cart_core::{Cart, KeyValueStore, format_order_message};
use wasi_cart_storefront::checkout::{CheckoutError, checkout_link};
use wasi_cart_storefront::config::StorefrontConfig;

/// Produce the order message, or the WhatsApp link carrying it.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] when there is nothing to order.
pub fn run<S: KeyValueStore>(
    cart: &Cart<S>,
    config: &StorefrontConfig,
    link: bool,
) -> Result<String, CheckoutError> {
    let summary = cart.summary();
    let labels = config.locale.labels();

    if link {
        return Ok(checkout_link(&config.whatsapp_phone, &summary, &labels)?.to_string());
    }
    if summary.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    Ok(format_order_message(&summary, &labels))
}

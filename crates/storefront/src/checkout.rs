//! Checkout handoff to the restaurant's WhatsApp chat.

use thiserror::Error;
use url::Url;
use wasi_cart_core::{CartSummary, MessageLabels, format_order_message};

/// Base of the click-to-chat link.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Errors building the checkout link.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("Cart is empty, add some dishes or combos first")]
    EmptyCart,

    /// The phone number is not digits only.
    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    /// The assembled link did not parse.
    #[error("Invalid checkout URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Build `https://wa.me/{phone}?text={order message}`.
///
/// The message is percent-encoded here; the formatter itself returns plain text.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] for an empty cart and
/// [`CheckoutError::InvalidPhone`] if `phone` is not all digits.
pub fn checkout_link(
    phone: &str,
    summary: &CartSummary,
    labels: &MessageLabels,
) -> Result<Url, CheckoutError> {
    if summary.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(CheckoutError::InvalidPhone(phone.to_string()));
    }

    let message = format_order_message(summary, labels);
    let url = Url::parse(&format!(
        "{WHATSAPP_BASE_URL}/{phone}?text={}",
        urlencoding::encode(&message)
    ))?;

    tracing::info!(
        items = summary.items.len(),
        total = %summary.totals.total,
        "Checkout link built"
    );
    Ok(url)
}

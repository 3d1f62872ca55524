//! Order summary text for the messaging handoff.
//!
//! The checkout button opens a chat with the restaurant pre-filled with the
//! order. This module only builds the text; URL encoding and opening the link
//! belong to the host.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::cart::CartSummary;
use crate::pricing::format_amount;

/// Customer-info placeholder the recipient fills in.
const BLANK: &str = "________________";

/// Language of the order message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    /// Labels for this locale.
    #[must_use]
    pub const fn labels(self) -> MessageLabels {
        match self {
            Self::Es => MessageLabels::SPANISH,
            Self::En => MessageLabels::ENGLISH,
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" => Ok(Self::Es),
            "en" => Ok(Self::En),
            other => Err(format!("unsupported locale `{other}` (expected `es` or `en`)")),
        }
    }
}

/// Fixed strings of the order message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageLabels {
    pub greeting: &'static str,
    pub intro: &'static str,
    pub subtotal: &'static str,
    pub delivery: &'static str,
    /// Shown instead of an amount when delivery is waived.
    pub free: &'static str,
    pub total: &'static str,
    pub customer_header: &'static str,
    /// Name, address, reference, phone.
    pub customer_fields: [&'static str; 4],
    pub closing: &'static str,
}

impl MessageLabels {
    pub const SPANISH: Self = Self {
        greeting: "¡Hola WASI! 👋",
        intro: "Me gustaría hacer el siguiente pedido:",
        subtotal: "Subtotal",
        delivery: "Delivery",
        free: "GRATIS",
        total: "TOTAL",
        customer_header: "--- DATOS DEL CLIENTE ---",
        customer_fields: ["Nombre", "Dirección", "Referencia", "Teléfono"],
        closing: "¿Podrían confirmar disponibilidad y tiempo de entrega? ¡Gracias!",
    };

    pub const ENGLISH: Self = Self {
        greeting: "Hi WASI! 👋",
        intro: "I would like to place the following order:",
        subtotal: "Subtotal",
        delivery: "Delivery",
        free: "FREE",
        total: "TOTAL",
        customer_header: "--- CUSTOMER DETAILS ---",
        customer_fields: ["Name", "Address", "Reference", "Phone"],
        closing: "Could you confirm availability and delivery time? Thank you!",
    };
}

impl Default for MessageLabels {
    fn default() -> Self {
        Self::SPANISH
    }
}

/// Render the cart as a plain-text order.
///
/// One line per entry in cart order, then subtotal, delivery (the computed
/// charge, or the free marker when waived), the bold grand total and the
/// customer-info template. The result is not URL-encoded.
#[must_use]
pub fn format_order_message(summary: &CartSummary, labels: &MessageLabels) -> String {
    let mut message = String::new();

    // `write!` into a String cannot fail.
    let _ = write!(message, "{}\n\n{}\n\n", labels.greeting, labels.intro);

    for item in &summary.items {
        let _ = writeln!(
            message,
            "• {}x {} - {}",
            item.quantity,
            item.name,
            format_amount(item.line_total())
        );
    }

    let totals = &summary.totals;
    let delivery = if totals.is_free_delivery() {
        labels.free.to_string()
    } else {
        format_amount(totals.delivery)
    };

    let _ = write!(
        message,
        "\n{}: {}\n{}: {}\n*{}: {}*",
        labels.subtotal,
        format_amount(totals.subtotal),
        labels.delivery,
        delivery,
        labels.total,
        format_amount(totals.total),
    );

    let _ = write!(message, "\n\n{}", labels.customer_header);
    for field in labels.customer_fields {
        let _ = write!(message, "\n{field}: {BLANK}");
    }
    let _ = write!(message, "\n\n{}", labels.closing);

    message
}

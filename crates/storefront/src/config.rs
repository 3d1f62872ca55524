//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `WASI_CART_DIR` - Directory holding the persisted cart (default: .wasi-cart)
//! - `WASI_DELIVERY_FEE` - Flat delivery fee in soles (default: 5.00)
//! - `WASI_MIN_FREE_DELIVERY` - Subtotal at which delivery is free (default: 50.00)
//! - `WASI_WHATSAPP_PHONE` - Restaurant number for checkout, digits only (default: 51931686244)
//! - `WASI_LOCALE` - Order message language, `es` or `en` (default: es)

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;
use wasi_cart_core::{Locale, Price, PricingPolicy};

const DEFAULT_CART_DIR: &str = ".wasi-cart";
const DEFAULT_WHATSAPP_PHONE: &str = "51931686244";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory of the file-backed cart store
    pub cart_dir: PathBuf,
    /// Delivery fee and free-delivery threshold
    pub pricing: PricingPolicy,
    /// Phone number the checkout link opens a chat with
    pub whatsapp_phone: String,
    /// Language of the order message
    pub locale: Locale,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            cart_dir: PathBuf::from(DEFAULT_CART_DIR),
            pricing: PricingPolicy::default(),
            whatsapp_phone: DEFAULT_WHATSAPP_PHONE.to_string(),
            locale: Locale::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let cart_dir = lookup("WASI_CART_DIR").map_or(defaults.cart_dir, PathBuf::from);
        let delivery_fee = get_amount(&lookup, "WASI_DELIVERY_FEE")?
            .unwrap_or(defaults.pricing.delivery_fee);
        let min_free_delivery = get_amount(&lookup, "WASI_MIN_FREE_DELIVERY")?
            .unwrap_or(defaults.pricing.min_free_delivery);
        let whatsapp_phone = match lookup("WASI_WHATSAPP_PHONE") {
            Some(phone) => validate_phone(&phone, "WASI_WHATSAPP_PHONE")?,
            None => defaults.whatsapp_phone,
        };
        let locale = match lookup("WASI_LOCALE") {
            Some(value) => value
                .parse::<Locale>()
                .map_err(|e| ConfigError::InvalidEnvVar("WASI_LOCALE".to_string(), e))?,
            None => defaults.locale,
        };

        Ok(Self {
            cart_dir,
            pricing: PricingPolicy::new(delivery_fee, min_free_delivery),
            whatsapp_phone,
            locale,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional non-negative amount.
fn get_amount(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<Decimal>, ConfigError> {
    lookup(key)
        .map(|value| {
            Price::parse(&value)
                .map(|price| price.amount())
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}

/// Strip spaces and a leading `+`, then require digits only.
fn validate_phone(value: &str, var_name: &str) -> Result<String, ConfigError> {
    let phone: String = value
        .trim()
        .trim_start_matches('+')
        .chars()
        .filter(|c| *c != ' ')
        .collect();
    if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must contain only digits (got `{value}`)"),
        ));
    }
    Ok(phone)
}

//! Unified error handling.
//!
//! Provides a unified `AppError` type for hosts. Cart mutations themselves
//! never fail; errors come from configuration, storage, restoring a corrupt
//! cart, or checkout.

use thiserror::Error;
use wasi_cart_core::{StorageError, ValidationError};

use crate::checkout::CheckoutError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The cart store could not be opened or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input or persisted cart data is invalid.
    #[error("Invalid cart data: {0}")]
    Validation(#[from] ValidationError),

    /// Checkout link could not be built.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

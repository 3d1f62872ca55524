//! CLI command implementations.
//!
//! Commands return their output as a string; `main` decides where it goes.

pub mod cart;
pub mod checkout;

//! WASI Cart Storefront library.
//!
//! The presentation side of the ordering site: it owns configuration and the
//! on-disk store, turns cart snapshots into display data, and builds the
//! messaging deep link used at checkout. It only talks to the cart through
//! its public operations and change notifications.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod error;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod views;

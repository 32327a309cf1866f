//! Comanda Core - Shared types library.
//!
//! This crate provides common types used across all Comanda components:
//! - `storefront` - Public-facing menu, cart, and checkout site
//! - `admin` - Internal product management panel
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. The shopping cart and the checkout message
//! formatter live here because they are the only parts of the system with real
//! invariants; everything that talks to the outside world stays in the
//! binaries.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money formatting, product/category read models
//! - [`cart`] - The shopping cart state container
//! - [`store`] - Observable wrapper around the cart
//! - [`checkout`] - WhatsApp order message formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod store;
pub mod types;

pub use cart::{Cart, CartEntry, CartEvent};
pub use store::{CartObserver, CartStore};
pub use types::*;

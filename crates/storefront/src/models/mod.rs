//! Storefront domain types and session keys.

pub mod session;

pub use session::session_keys;

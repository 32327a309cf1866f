//! Session storage keys and helpers.

/// Keys under which storefront data lives in the session.
pub mod session_keys {
    /// The serialized [`comanda_core::Cart`] for this session.
    pub const CART: &str = "comanda.cart";
}

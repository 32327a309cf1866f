//! The shopping cart state container.
//!
//! A [`Cart`] is the single source of truth for a customer's in-progress
//! order. It is plain serializable data: the storefront keeps one per session
//! and mutates it through the operations here, which are all synchronous and
//! total - an unknown product id is a no-op, never an error.
//!
//! # Invariants
//!
//! - Entries are unique per [`ProductId`]; adding an already-present product
//!   increments its quantity instead of creating a duplicate entry.
//! - Quantities are always >= 1; an entry whose quantity would reach 0 is
//!   removed, never retained at zero.
//! - Entries keep insertion order (first-added product stays first) for
//!   stable display.
//! - `total_items` and `total_price` are derived fresh on every read.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// A (product, quantity) pairing inside the cart.
///
/// The product is a snapshot captured at add-time; later catalog edits do not
/// affect entries already in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product: Product,
    pub quantity: u32,
}

impl CartEntry {
    /// Price of this line (unit price x quantity).
    #[must_use]
    pub fn line_price(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// What a mutating cart operation changed.
///
/// Returned by every mutation and published to [`crate::store::CartObserver`]s
/// so dependent views can redisplay without the cart knowing anything about
/// rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    /// A new entry was created with quantity 1.
    ItemAdded(ProductId),
    /// An existing entry's quantity changed.
    QuantityChanged { id: ProductId, quantity: u32 },
    /// An entry was removed (explicitly, or by decrementing past 1).
    ItemRemoved(ProductId),
    /// The whole cart was emptied.
    Cleared,
    /// The operation was a no-op (e.g. incrementing an absent product).
    Unchanged,
}

impl CartEvent {
    /// Whether the operation actually modified cart state.
    #[must_use]
    pub const fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// An insertion-ordered collection of cart entries.
///
/// Created empty at session start, serialized into the session between
/// requests, and cleared after the order is handed off or the customer empties
/// it explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add one unit of `product`.
    ///
    /// If the product is already in the cart its quantity is incremented;
    /// otherwise a new entry with quantity 1 is appended. Always succeeds.
    pub fn add_item(&mut self, product: Product) -> CartEvent {
        if let Some(entry) = self.entry_mut(product.id) {
            entry.quantity += 1;
            return CartEvent::QuantityChanged {
                id: product.id,
                quantity: entry.quantity,
            };
        }

        let id = product.id;
        self.entries.push(CartEntry {
            product,
            quantity: 1,
        });
        CartEvent::ItemAdded(id)
    }

    /// Remove the entry for `id` entirely. No-op if absent.
    pub fn remove_item(&mut self, id: ProductId) -> CartEvent {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.product.id != id);
        if self.entries.len() == before {
            CartEvent::Unchanged
        } else {
            CartEvent::ItemRemoved(id)
        }
    }

    /// Increment the quantity of an existing entry.
    ///
    /// Unlike [`Cart::add_item`], this never creates an entry: incrementing an
    /// absent product is a no-op.
    pub fn increment_qty(&mut self, id: ProductId) -> CartEvent {
        match self.entry_mut(id) {
            Some(entry) => {
                entry.quantity += 1;
                CartEvent::QuantityChanged {
                    id,
                    quantity: entry.quantity,
                }
            }
            None => CartEvent::Unchanged,
        }
    }

    /// Decrement the quantity of an existing entry.
    ///
    /// At quantity 1 the entry is removed entirely (equivalent to
    /// [`Cart::remove_item`]); an absent product is a no-op.
    pub fn decrement_qty(&mut self, id: ProductId) -> CartEvent {
        match self.entry_mut(id) {
            Some(entry) if entry.quantity > 1 => {
                entry.quantity -= 1;
                CartEvent::QuantityChanged {
                    id,
                    quantity: entry.quantity,
                }
            }
            Some(_) => self.remove_item(id),
            None => CartEvent::Unchanged,
        }
    }

    /// Empty the cart unconditionally. Idempotent.
    pub fn clear(&mut self) -> CartEvent {
        self.entries.clear();
        CartEvent::Cleared
    }

    /// Quantity of the entry for `id`, or 0 if absent. Pure read.
    #[must_use]
    pub fn item_quantity(&self, id: ProductId) -> u32 {
        self.entry(id).map_or(0, |entry| entry.quantity)
    }

    /// Total number of units across all entries.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.entries.iter().map(|entry| entry.quantity).sum()
    }

    /// Sum of line prices across all entries.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.entries.iter().map(CartEntry::line_price).sum()
    }

    fn entry(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.product.id == id)
    }

    fn entry_mut(&mut self, id: ProductId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|entry| entry.product.id == id)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;
    use crate::types::CategoryId;

    fn product(id: i32, name: &str, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: String::new(),
            price,
            category_id: CategoryId::new(1),
            image_url: None,
            image_data: None,
            in_stock: true,
        }
    }

    #[test]
    fn test_add_distinct_products() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add_item(product(1, "Milanesa", dec!(10.00))),
            CartEvent::ItemAdded(ProductId::new(1))
        );
        cart.add_item(product(2, "Empanada", dec!(5.50)));
        cart.add_item(product(3, "Flan", dec!(4.25)));

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), dec!(19.75));
        assert_eq!(cart.entries().len(), 3);
    }

    #[test]
    fn test_add_same_product_twice_merges() {
        let mut cart = Cart::new();
        cart.add_item(product(1, "Milanesa", dec!(10.00)));
        let event = cart.add_item(product(1, "Milanesa", dec!(10.00)));

        assert_eq!(
            event,
            CartEvent::QuantityChanged {
                id: ProductId::new(1),
                quantity: 2
            }
        );
        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.item_quantity(ProductId::new(1)), 2);
    }

    #[test]
    fn test_insertion_order_is_stable() {
        let mut cart = Cart::new();
        cart.add_item(product(2, "Empanada", dec!(5.50)));
        cart.add_item(product(1, "Milanesa", dec!(10.00)));
        cart.add_item(product(2, "Empanada", dec!(5.50)));

        let names: Vec<&str> = cart
            .entries()
            .iter()
            .map(|entry| entry.product.name.as_str())
            .collect();
        assert_eq!(names, ["Empanada", "Milanesa"]);
    }

    #[test]
    fn test_decrement_at_one_removes_entry() {
        let mut cart = Cart::new();
        cart.add_item(product(1, "Milanesa", dec!(10.00)));

        assert_eq!(
            cart.decrement_qty(ProductId::new(1)),
            CartEvent::ItemRemoved(ProductId::new(1))
        );
        assert!(cart.is_empty());

        // A second decrement is a no-op, not an error
        assert_eq!(cart.decrement_qty(ProductId::new(1)), CartEvent::Unchanged);
    }

    #[test]
    fn test_increment_absent_differs_from_add() {
        let mut cart = Cart::new();

        assert_eq!(cart.increment_qty(ProductId::new(7)), CartEvent::Unchanged);
        assert_eq!(cart.item_quantity(ProductId::new(7)), 0);
        assert!(cart.is_empty());

        cart.add_item(product(7, "Pizza", dec!(12.00)));
        assert_eq!(cart.item_quantity(ProductId::new(7)), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(product(1, "Milanesa", dec!(10.00)));

        assert_eq!(cart.remove_item(ProductId::new(99)), CartEvent::Unchanged);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_totals_scenario() {
        // add A ($10.00) x1, add B ($5.50) x1, increment A
        let mut cart = Cart::new();
        cart.add_item(product(1, "A", dec!(10.00)));
        cart.add_item(product(2, "B", dec!(5.50)));
        cart.increment_qty(ProductId::new(1));

        assert_eq!(cart.item_quantity(ProductId::new(1)), 2);
        assert_eq!(cart.item_quantity(ProductId::new(2)), 1);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), dec!(25.50));
    }

    #[test]
    fn test_decrement_scenario() {
        let mut cart = Cart::new();
        cart.add_item(product(1, "A", dec!(10.00)));
        cart.increment_qty(ProductId::new(1));

        cart.decrement_qty(ProductId::new(1));
        assert_eq!(cart.item_quantity(ProductId::new(1)), 1);

        cart.decrement_qty(ProductId::new(1));
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), dec!(0));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(product(1, "A", dec!(10.00)));
        cart.add_item(product(2, "B", dec!(5.50)));

        assert_eq!(cart.clear(), CartEvent::Cleared);
        assert_eq!(cart.total_items(), 0);
        assert!(cart.entries().is_empty());

        assert_eq!(cart.clear(), CartEvent::Cleared);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_snapshot_insulates_from_catalog_edits() {
        let mut cart = Cart::new();
        cart.add_item(product(1, "Milanesa", dec!(10.00)));

        // The same product at a new price creates no duplicate and keeps the
        // captured snapshot's price
        cart.add_item(product(1, "Milanesa", dec!(12.00)));
        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.total_price(), dec!(20.00));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut cart = Cart::new();
        cart.add_item(product(1, "Milanesa", dec!(10.00)));
        cart.add_item(product(2, "Empanada", dec!(5.50)));
        cart.increment_qty(ProductId::new(1));

        let json = serde_json::to_string(&cart).expect("serialize");
        let restored: Cart = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, cart);
        assert_eq!(restored.total_price(), dec!(25.50));
    }
}

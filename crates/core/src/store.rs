//! Observable wrapper around the cart.
//!
//! The cart is an explicitly owned value and [`CartStore`] is the seam for
//! anything that wants to react to changes:
//! observers subscribe and receive every [`CartEvent`] a mutating operation
//! produces, without the store knowing anything about rendering. The
//! storefront uses this to log cart activity; the client-side redisplay is
//! driven by the HTMX trigger header the routes derive from the same events.

use crate::cart::{Cart, CartEvent};
use crate::types::{Product, ProductId};

/// Receives every event published by a [`CartStore`].
///
/// Observers run on the same thread as the mutation; the cart never suspends.
pub trait CartObserver {
    fn on_cart_event(&mut self, cart: &Cart, event: &CartEvent);
}

impl<F> CartObserver for F
where
    F: FnMut(&Cart, &CartEvent),
{
    fn on_cart_event(&mut self, cart: &Cart, event: &CartEvent) {
        self(cart, event);
    }
}

/// A [`Cart`] plus its subscribers.
///
/// Every mutating operation publishes exactly one event (including no-op
/// events, so observers can count attempts); pure reads publish nothing.
#[derive(Default)]
pub struct CartStore {
    cart: Cart,
    observers: Vec<Box<dyn CartObserver>>,
}

impl CartStore {
    /// Create a store around an existing cart (e.g. one restored from the
    /// session).
    #[must_use]
    pub fn new(cart: Cart) -> Self {
        Self {
            cart,
            observers: Vec::new(),
        }
    }

    /// Register an observer for subsequent mutations.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Read-only access to the current state.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Take the cart back out of the store (e.g. to persist it).
    #[must_use]
    pub fn into_cart(self) -> Cart {
        self.cart
    }

    pub fn add_item(&mut self, product: Product) -> CartEvent {
        let event = self.cart.add_item(product);
        self.publish(event)
    }

    pub fn remove_item(&mut self, id: ProductId) -> CartEvent {
        let event = self.cart.remove_item(id);
        self.publish(event)
    }

    pub fn increment_qty(&mut self, id: ProductId) -> CartEvent {
        let event = self.cart.increment_qty(id);
        self.publish(event)
    }

    pub fn decrement_qty(&mut self, id: ProductId) -> CartEvent {
        let event = self.cart.decrement_qty(id);
        self.publish(event)
    }

    pub fn clear(&mut self) -> CartEvent {
        let event = self.cart.clear();
        self.publish(event)
    }

    fn publish(&mut self, event: CartEvent) -> CartEvent {
        for observer in &mut self.observers {
            observer.on_cart_event(&self.cart, &event);
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rust_decimal::dec;

    use super::*;
    use crate::types::CategoryId;

    fn product(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            description: String::new(),
            price: dec!(10.00),
            category_id: CategoryId::new(1),
            image_url: None,
            image_data: None,
            in_stock: true,
        }
    }

    #[test]
    fn test_publishes_one_event_per_mutation() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let mut store = CartStore::default();
        store.subscribe(move |_cart: &Cart, event: &CartEvent| {
            sink.borrow_mut().push(*event);
        });

        store.add_item(product(1));
        store.add_item(product(1));
        store.increment_qty(ProductId::new(9)); // no-op, still published
        store.decrement_qty(ProductId::new(1));
        store.clear();

        assert_eq!(
            *events.borrow(),
            vec![
                CartEvent::ItemAdded(ProductId::new(1)),
                CartEvent::QuantityChanged {
                    id: ProductId::new(1),
                    quantity: 2
                },
                CartEvent::Unchanged,
                CartEvent::QuantityChanged {
                    id: ProductId::new(1),
                    quantity: 1
                },
                CartEvent::Cleared,
            ]
        );
    }

    #[test]
    fn test_reads_publish_nothing() {
        let count = Rc::new(RefCell::new(0u32));
        let sink = Rc::clone(&count);

        let mut store = CartStore::default();
        store.subscribe(move |_: &Cart, _: &CartEvent| *sink.borrow_mut() += 1);

        store.add_item(product(1));
        let _ = store.cart().total_items();
        let _ = store.cart().total_price();
        let _ = store.cart().item_quantity(ProductId::new(1));

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_observer_sees_updated_state() {
        let seen_totals = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen_totals);

        let mut store = CartStore::default();
        store.subscribe(move |cart: &Cart, _: &CartEvent| {
            sink.borrow_mut().push(cart.total_items());
        });

        store.add_item(product(1));
        store.add_item(product(2));
        store.remove_item(ProductId::new(1));

        assert_eq!(*seen_totals.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn test_into_cart_round_trip() {
        let mut store = CartStore::new(Cart::new());
        store.add_item(product(1));
        let cart = store.into_cart();
        assert_eq!(cart.total_items(), 1);
    }
}

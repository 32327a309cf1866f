//! Checkout message formatting.
//!
//! Orders leave the system as a WhatsApp message: the cart contents plus the
//! customer-supplied delivery details are rendered into a text block, percent
//! encoded, and handed off as a `wa.me` link. Both steps are pure functions;
//! the destination number is deployment configuration supplied by the caller.

use crate::cart::Cart;
use crate::types::money;

const DIVIDER: &str = "─────────────────";

/// Customer-supplied delivery details from the checkout form.
///
/// Empty fields are omitted from the message entirely rather than rendered as
/// blank lines.
#[derive(Debug, Clone, Default)]
pub struct OrderDetails {
    pub name: String,
    pub phone: String,
    pub notes: String,
}

/// Render the cart and delivery details into the WhatsApp order message.
///
/// Line items appear in the cart's insertion order; monetary values carry
/// exactly two decimal places. The output is deterministic for identical
/// input.
///
/// Callers must not invoke this on an empty cart (the storefront redirects to
/// the menu instead); the empty-cart output is not a meaningful order.
#[must_use]
pub fn order_message(cart: &Cart, details: &OrderDetails) -> String {
    debug_assert!(!cart.is_empty(), "order_message called on an empty cart");

    let mut message =
        String::from("*Hola!* me comunico para realizarle un pedido *Take Away*\n\n");

    if !details.name.is_empty() {
        message.push_str(&format!("*Nombre:* {}\n", details.name));
    }
    if !details.phone.is_empty() {
        message.push_str(&format!("*Teléfono:* {}\n", details.phone));
    }
    message.push('\n');

    message.push_str("*Detalle del pedido:*\n");
    message.push_str(DIVIDER);
    message.push('\n');

    for entry in cart.entries() {
        message.push_str(&format!("• {}\n", entry.product.name));
        message.push_str(&format!("   *Cantidad:* {}\n", entry.quantity));
        message.push_str(&format!(
            "   *Precio:* {}\n",
            money::display(entry.line_price())
        ));
    }

    message.push_str(DIVIDER);
    message.push('\n');
    message.push_str(&format!(
        "*TOTAL A PAGAR (Sin envio):* {}\n",
        money::display(cart.total_price())
    ));

    if !details.notes.is_empty() {
        message.push_str(&format!("\n*Aclaraciones:* {}\n", details.notes));
    }

    message
}

/// Build the transport-ready `wa.me` hand-off URL for a formatted message.
#[must_use]
pub fn whatsapp_url(number: &str, message: &str) -> String {
    format!("https://wa.me/{number}?text={}", urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;
    use crate::types::{CategoryId, Product, ProductId};

    fn product(id: i32, name: &str, price: rust_decimal::Decimal) -> Product {
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

    fn cart_with_a_times_two() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(product(1, "Milanesa Napolitana", dec!(10.00)));
        cart.increment_qty(ProductId::new(1));
        cart
    }

    #[test]
    fn test_message_without_optional_fields() {
        let message = order_message(&cart_with_a_times_two(), &OrderDetails::default());

        assert!(message.contains("• Milanesa Napolitana"));
        assert!(message.contains("*Cantidad:* 2"));
        assert!(message.contains("*Precio:* $20.00"));
        assert!(message.contains("*TOTAL A PAGAR (Sin envio):* $20.00"));
        assert!(!message.contains("*Nombre:*"));
        assert!(!message.contains("*Teléfono:*"));
        assert!(!message.contains("*Aclaraciones:*"));
    }

    #[test]
    fn test_message_with_all_fields() {
        let details = OrderDetails {
            name: "Juan Pérez".to_owned(),
            phone: "+54 11 1234-5678".to_owned(),
            notes: "Sin cebolla".to_owned(),
        };
        let message = order_message(&cart_with_a_times_two(), &details);

        assert!(message.starts_with("*Hola!* me comunico para realizarle un pedido *Take Away*\n\n"));
        assert!(message.contains("*Nombre:* Juan Pérez\n"));
        assert!(message.contains("*Teléfono:* +54 11 1234-5678\n"));
        assert!(message.ends_with("\n*Aclaraciones:* Sin cebolla\n"));
    }

    #[test]
    fn test_line_items_in_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(product(2, "Empanada", dec!(5.50)));
        cart.add_item(product(1, "Milanesa", dec!(10.00)));

        let message = order_message(&cart, &OrderDetails::default());
        let empanada = message.find("• Empanada").expect("empanada line");
        let milanesa = message.find("• Milanesa").expect("milanesa line");
        assert!(empanada < milanesa);
        assert!(message.contains("*TOTAL A PAGAR (Sin envio):* $15.50"));
    }

    #[test]
    fn test_message_is_deterministic() {
        let cart = cart_with_a_times_two();
        let details = OrderDetails {
            name: "Ana".to_owned(),
            ..OrderDetails::default()
        };
        assert_eq!(order_message(&cart, &details), order_message(&cart, &details));
    }

    #[test]
    fn test_whatsapp_url_encodes_message() {
        let url = whatsapp_url("5491112345678", "*Hola!* pedido\ncon saltos");

        assert!(url.starts_with("https://wa.me/5491112345678?text="));
        assert!(url.contains("%2A"), "asterisks must be percent-encoded");
        assert!(url.contains("%0A"), "newlines must be percent-encoded");
        assert!(!url.contains('\n'));
        assert!(!url.contains(' '));
    }
}

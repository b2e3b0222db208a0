//! The session-scoped cart store.
//!
//! A [`Cart`] holds the shopper's pending selections for the lifetime of a
//! browsing session. It is a plain owned value: the embedding application
//! decides where it lives and how mutations are serialized (the storefront
//! service wraps it in a mutex). Nothing here performs I/O; mirroring cart
//! lines into the backend is the service layer's concern.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// One line in the cart.
///
/// Title and unit price are denormalized snapshots taken at add time, so a
/// later catalog price change does not retroactively reprice the cart. The
/// unit price may already reflect a discount applied when the item was
/// added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product this line refers to.
    pub id: ProductId,
    /// Product title at add time.
    pub title: String,
    /// Unit price at add time.
    pub unit_price: Price,
    /// Number of units. Callers keep this within 1-99; the store applies
    /// whatever it is given.
    pub quantity: u32,
}

impl CartItem {
    /// Line total: unit price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}

/// The cart: an insertion-ordered collection with at most one line per
/// product id.
///
/// Created empty at session start and discarded with the session; it is
/// not persisted across reloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The current lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` units of a product.
    ///
    /// If a line with the same product id already exists its quantity is
    /// increased by `quantity`; otherwise a new line is appended. Always
    /// succeeds.
    ///
    /// Precondition: `quantity` has been clamped to 1-99 by the caller
    /// (the quantity stepper enforces this); the store does not re-check.
    pub fn add(&mut self, id: ProductId, title: impl Into<String>, unit_price: Price, quantity: u32) {
        if let Some(existing) = self.items.iter_mut().find(|item| item.id == id) {
            existing.quantity += quantity;
            return;
        }

        self.items.push(CartItem {
            id,
            title: title.into(),
            unit_price,
            quantity,
        });
    }

    /// Remove the line for `id`. Absent ids are a no-op, not an error.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|item| item.id != id);
    }

    /// Set the quantity of the line for `id` to `quantity`, verbatim.
    /// No-op if the id is absent.
    ///
    /// Unlike the stepper path through [`Cart::add`], direct quantity
    /// entry is not clamped anywhere; this store applies the value as
    /// given.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = quantity;
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Σ(unit price × quantity) over all lines, recomputed on every call.
    ///
    /// The collection holds tens of lines at most, so recomputing is
    /// cheaper than keeping a running total correct.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(n: i64) -> ProductId {
        ProductId::new(n)
    }

    #[test]
    fn test_add_distinct_ids_one_line_each() {
        let mut cart = Cart::new();
        cart.add(id(1), "Chocolate", Price::from_cents(500), 1);
        cart.add(id(2), "Baunilha", Price::from_cents(300), 2);
        cart.add(id(3), "Morango", Price::from_cents(450), 1);

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total(), Price::from_cents(500 + 600 + 450));
    }

    #[test]
    fn test_add_same_id_merges_quantity() {
        let mut cart = Cart::new();
        cart.add(id(1), "Chocolate", Price::from_cents(500), 2);
        cart.add(id(1), "Chocolate", Price::from_cents(500), 3);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.total(), Price::from_cents(2500));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(id(3), "Morango", Price::from_cents(450), 1);
        cart.add(id(1), "Chocolate", Price::from_cents(500), 1);
        cart.add(id(3), "Morango", Price::from_cents(450), 1);

        let ids: Vec<_> = cart.items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![id(3), id(1)]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.remove(id(9));
        assert!(cart.is_empty());

        cart.add(id(1), "Chocolate", Price::from_cents(500), 1);
        let before = cart.clone();
        cart.remove(id(9));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_present() {
        let mut cart = Cart::new();
        cart.add(id(1), "Chocolate", Price::from_cents(500), 1);
        cart.add(id(2), "Baunilha", Price::from_cents(300), 1);
        cart.remove(id(1));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].id, id(2));
    }

    #[test]
    fn test_set_quantity_is_verbatim() {
        let mut cart = Cart::new();
        cart.add(id(1), "Chocolate", Price::from_cents(500), 1);

        cart.set_quantity(id(1), 42);
        assert_eq!(cart.items()[0].quantity, 42);

        // Not clamped: 0 and out-of-range values are applied as given.
        cart.set_quantity(id(1), 0);
        assert_eq!(cart.items()[0].quantity, 0);
        cart.set_quantity(id(1), 150);
        assert_eq!(cart.items()[0].quantity, 150);
    }

    #[test]
    fn test_set_quantity_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(id(1), "Chocolate", Price::from_cents(500), 2);
        cart.set_quantity(id(7), 5);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_clear_yields_empty_and_zero_total() {
        let mut cart = Cart::new();
        cart.add(id(1), "Chocolate", Price::from_cents(500), 3);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_total_to_the_cent() {
        let mut cart = Cart::new();
        // 3 × 1,10 + 2 × 2,35 = 3,30 + 4,70 = 8,00
        cart.add(id(1), "Limão", Price::from_cents(110), 3);
        cart.add(id(2), "Pistache", Price::from_cents(235), 2);

        assert_eq!(cart.total(), Price::from_cents(800));
        assert_eq!(cart.total().display(), "8,00");
    }

    #[test]
    fn test_merge_scenario() {
        // add 2, then 3 more of the same product: one line, quantity 5,
        // total 25,00
        let mut cart = Cart::new();
        cart.add(id(1), "Chocolate", Price::from_cents(500), 2);
        cart.add(id(1), "Chocolate", Price::from_cents(500), 3);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.total().display(), "25,00");
    }
}

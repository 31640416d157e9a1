//! # Cart Model
//!
//! The in-memory cart: an ordered list of lines, unique by product.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operations                                   │
//! │                                                                         │
//! │  Cashier Action           Cart Operation          State Change          │
//! │  ──────────────           ──────────────          ────────────          │
//! │                                                                         │
//! │  Click product ──────────► add_product() ───────► qty+1 or new line    │
//! │                                                                         │
//! │  Click +/- ──────────────► change_quantity() ───► ±1, floors at 1      │
//! │                                                                         │
//! │  Click trash ────────────► remove_line() ───────► line deleted         │
//! │                                                                         │
//! │  Read summary ───────────► totals(rate) ────────► derived, never stale │
//! │                                                                         │
//! │  Every operation is a TOTAL function: no error returns, no panics.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id` (adding the same product increments)
//! - `quantity >= 1` always (decrement floors at 1; only remove deletes)
//! - Line totals and cart totals are recomputed on every read, never stored

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Product, SaleItem, TaxRate};

// =============================================================================
// Cart Line
// =============================================================================

/// Direction for a quantity adjustment on an existing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityChange {
    /// Add one unit.
    Increase,
    /// Remove one unit, never going below 1.
    Decrease,
}

/// A line in the cart.
///
/// ## Price Freezing
/// Name and unit price are captured when the product is first added. If the
/// backend price changes while the cart is open, the line keeps the price
/// the cashier quoted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Backend product identifier (the line key).
    pub product_id: i64,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price in centavos at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Quantity in cart, always >= 1.
    pub quantity: i64,

    /// When this line was first added.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new line from a product with quantity 1.
    fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// The line total (unit price × quantity), recomputed on every call.
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// The line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents())
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart: ordered collection of lines, unique by product id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product to the cart.
    ///
    /// If a line for that product already exists its quantity goes up by
    /// one; otherwise a new line with quantity 1 is appended. Line order is
    /// insertion order.
    pub fn add_product(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine::from_product(product));
    }

    /// Adjusts the quantity of an existing line by one in either direction.
    ///
    /// Decrease floors at 1 - a line is never removed by decrementing, only
    /// by [`Cart::remove_line`]. Unknown product ids are ignored.
    pub fn change_quantity(&mut self, product_id: i64, change: QuantityChange) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = match change {
                QuantityChange::Increase => line.quantity + 1,
                QuantityChange::Decrease => (line.quantity - 1).max(1),
            };
        }
    }

    /// Removes a line unconditionally. Unknown product ids are ignored.
    pub fn remove_line(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Clears all lines (new sale).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The subtotal in centavos (sum of line totals).
    pub fn subtotal_cents(&self) -> i64 {
        self.lines.iter().map(|l| l.line_total_cents()).sum()
    }

    /// Derives subtotal, tax, and total for the given rate.
    ///
    /// Recomputed from the lines on every call; nothing is cached, so the
    /// summary can never go stale after a mutation.
    pub fn totals(&self, rate: TaxRate) -> CartTotals {
        let subtotal = Money::from_cents(self.subtotal_cents());
        let tax = subtotal.calculate_tax(rate);
        CartTotals {
            subtotal_cents: subtotal.cents(),
            tax_cents: tax.cents(),
            total_cents: (subtotal + tax).cents(),
        }
    }

    /// Snapshots the lines into the shape the sale endpoint expects.
    pub fn to_sale_items(&self) -> Vec<SaleItem> {
        self.lines
            .iter()
            .map(|l| SaleItem {
                product_id: l.product_id,
                quantity: l.quantity,
                subtotal_cents: l.line_total_cents(),
            })
            .collect()
    }
}

/// Derived cart summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
}

impl CartTotals {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price_cents: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            price_cents,
        }
    }

    #[test]
    fn test_add_product_starts_at_quantity_one() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 999));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.subtotal_cents(), 999);
    }

    #[test]
    fn test_add_same_product_twice_merges_lines() {
        let mut cart = Cart::new();
        let p = product(1, 999);

        cart.add_product(&p);
        cart.add_product(&p);

        assert_eq!(cart.line_count(), 1); // one line, not two
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.subtotal_cents(), 1998);
    }

    #[test]
    fn test_subtotal_from_spec_example() {
        // [{price: 10.00, qty: 2}, {price: 5.00, qty: 1}] → subtotal 25.00
        let mut cart = Cart::new();
        let a = product(1, 1000);
        let b = product(2, 500);

        cart.add_product(&a);
        cart.add_product(&a);
        cart.add_product(&b);

        assert_eq!(cart.subtotal_cents(), 2500);
    }

    #[test]
    fn test_increase_and_decrease() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 500));

        cart.change_quantity(1, QuantityChange::Increase);
        cart.change_quantity(1, QuantityChange::Increase);
        assert_eq!(cart.lines()[0].quantity, 3);

        cart.change_quantity(1, QuantityChange::Decrease);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_decrease_floors_at_one() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 500));

        cart.change_quantity(1, QuantityChange::Decrease);
        cart.change_quantity(1, QuantityChange::Decrease);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_change_quantity_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 500));

        cart.change_quantity(99, QuantityChange::Increase);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_remove_line() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 500));
        cart.add_product(&product(2, 300));

        cart.remove_line(1);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].product_id, 2);

        // removing an absent line is harmless
        cart.remove_line(1);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_line_totals_track_quantity() {
        let mut cart = Cart::new();
        let p = product(1, 299);
        cart.add_product(&p);
        cart.change_quantity(1, QuantityChange::Increase);
        cart.change_quantity(1, QuantityChange::Increase);

        let line = &cart.lines()[0];
        assert_eq!(line.line_total_cents(), line.unit_price_cents * line.quantity);
        assert_eq!(line.line_total_cents(), 897);
    }

    #[test]
    fn test_subtotal_is_sum_of_line_totals_under_mutation() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 1099));
        cart.add_product(&product(2, 250));
        cart.add_product(&product(1, 1099));
        cart.change_quantity(2, QuantityChange::Increase);
        cart.change_quantity(1, QuantityChange::Decrease);
        cart.remove_line(2);
        cart.add_product(&product(3, 75));

        let expected: i64 = cart.lines().iter().map(|l| l.line_total_cents()).sum();
        assert_eq!(cart.subtotal_cents(), expected);
    }

    #[test]
    fn test_totals_with_storefront_rate() {
        let mut cart = Cart::new();
        let a = product(1, 1000);
        cart.add_product(&a);
        cart.add_product(&a);
        cart.add_product(&product(2, 500));

        let totals = cart.totals(TaxRate::from_bps(825));
        assert_eq!(totals.subtotal_cents, 2500);
        assert_eq!(totals.tax_cents, 206); // 25.00 × 8.25% = 2.0625 → 2.06
        assert_eq!(totals.total_cents, 2706);
    }

    #[test]
    fn test_totals_with_zero_rate() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 2500));

        let totals = cart.totals(TaxRate::zero());
        assert_eq!(totals.tax_cents, 0);
        assert_eq!(totals.total_cents, totals.subtotal_cents);
    }

    #[test]
    fn test_to_sale_items() {
        let mut cart = Cart::new();
        let a = product(7, 1000);
        cart.add_product(&a);
        cart.add_product(&a);
        cart.add_product(&product(9, 500));

        let items = cart.to_sale_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_id, 7);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].subtotal_cents, 2000);
        assert_eq!(items[1].product_id, 9);
        assert_eq!(items[1].subtotal_cents, 500);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 500));
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal_cents(), 0);
    }
}

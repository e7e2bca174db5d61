//! # Cart
//!
//! The in-progress selection: one line per product, checked against stock.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  add(P001, 2) ───────► line exists?  yes ─► qty += 2 (if stock allows)  │
//! │                                      no  ─► push { P001, 2 }            │
//! │                                                                         │
//! │  set_quantity(P001, n)                                                  │
//! │      n <= 0 ─────────► remove line                                      │
//! │      n > stock ──────► qty = stock, report InsufficientStock            │
//! │      otherwise ──────► qty = n                                          │
//! │                                                                         │
//! │  remove(P001) ───────► retain(id != P001)  (absent: no-op)              │
//! │                                                                         │
//! │  clear() ────────────► lines.clear()                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart stores ids and quantities only. Names and prices are joined in
//! from the catalog whenever a view or subtotal is requested, so totals are
//! always computed from live catalog data.

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, CartLineView, Product};

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product merges)
/// - Quantity is always > 0 (setting 0 removes the line)
/// - Lines keep insertion order for display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds `quantity` of `product`, merging with an existing line.
    ///
    /// ## Returns
    /// - `Ok(CartLine)` with the merged quantity
    /// - `Err(InvalidQuantity)` if `quantity <= 0`
    /// - `Err(InsufficientStock)` if the merged quantity would exceed stock;
    ///   the cart is left unchanged
    pub fn add(&mut self, product: &Product, quantity: i64) -> CoreResult<CartLine> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity {
                requested: quantity,
            });
        }

        let existing = self.quantity_of(&product.id);
        let requested = existing.saturating_add(quantity);
        if !product.can_fulfil(requested) {
            return Err(CoreError::InsufficientStock {
                product_id: product.id.clone(),
                available: product.stock,
                requested,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = requested;
            return Ok(line.clone());
        }

        let line = CartLine {
            product_id: product.id.clone(),
            quantity,
        };
        self.lines.push(line.clone());
        Ok(line)
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - No line for this product: no-op
    /// - `quantity <= 0`: removes the line
    /// - `quantity > stock`: clamps to stock (removing the line when stock
    ///   is 0) and returns `InsufficientStock`. The clamp is applied even
    ///   though an error is returned.
    pub fn set_quantity(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        let Some(index) = self.lines.iter().position(|l| l.product_id == product.id) else {
            return Ok(());
        };

        if quantity <= 0 {
            self.lines.remove(index);
            return Ok(());
        }

        if !product.can_fulfil(quantity) {
            if product.stock > 0 {
                self.lines[index].quantity = product.stock;
            } else {
                self.lines.remove(index);
            }
            return Err(CoreError::InsufficientStock {
                product_id: product.id.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        self.lines[index].quantity = quantity;
        Ok(())
    }

    /// Removes the line for `product_id`. Absent lines are ignored.
    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity currently in the cart for `product_id` (0 if absent).
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map_or(0, |l| l.quantity)
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.lines.iter().any(|l| l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Joins each line with its catalog product.
    ///
    /// Lines whose product is missing from `catalog` are skipped; the
    /// `InventoryCart` never creates such lines.
    pub fn views(&self, catalog: &Catalog) -> Vec<CartLineView> {
        self.lines
            .iter()
            .filter_map(|line| {
                let product = catalog.get(&line.product_id).ok()?;
                Some(CartLineView {
                    product_id: line.product_id.clone(),
                    name: product.name.clone(),
                    quantity: line.quantity,
                    unit_price: product.unit_price,
                    line_total: product.unit_price.multiply_quantity(line.quantity),
                })
            })
            .collect()
    }

    /// `Σ quantity × unit_price` at current catalog prices.
    pub fn subtotal(&self, catalog: &Catalog) -> Money {
        self.views(catalog).iter().map(|v| v.line_total).sum()
    }

    /// `subtotal`, or `None` if any line total or the sum overflows.
    pub fn checked_subtotal(&self, catalog: &Catalog) -> Option<Money> {
        self.lines.iter().try_fold(Money::zero(), |acc, line| {
            let product = catalog.get(&line.product_id).ok()?;
            acc.checked_add(product.unit_price.checked_multiply_quantity(line.quantity)?)
        })
    }
}

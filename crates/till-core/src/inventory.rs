//! # InventoryCart
//!
//! The point-of-sale state machine: catalog + cart + at most one pending
//! invoice.
//!
//! ## Checkout Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout State Machine                               │
//! │                                                                         │
//! │                 checkout()                                              │
//! │   ┌──────────┐ ───────────────► ┌──────────────────────┐                │
//! │   │   Idle   │                  │ PendingConfirmation  │ ◄─┐ checkout() │
//! │   └──────────┘ ◄─────────────── └──────────────────────┘ ──┘ (re-snap)  │
//! │        ▲        confirm():                  │                           │
//! │        │        stock -= qty, cart cleared  │                           │
//! │        └────────────────────────────────────┘                           │
//! │                 cancel(): snapshot dropped, nothing else changes        │
//! │                                                                         │
//! │  add / remove / set_quantity / clear are allowed in both states.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Single Writer
//! Every method is synchronous and takes `&mut self` when it mutates; the
//! owner (one presentation layer) is the only writer, so stock cannot move
//! between `checkout` and `confirm`. `confirm` still re-checks every line
//! before decrementing anything. Sharing one instance between clients would
//! need a per-product check-and-decrement instead.

use chrono::{DateTime, Local};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::invoice::build_snapshot;
use crate::types::{
    CartLine, CartLineView, CheckoutState, InvoiceSnapshot, Product, TaxRate, Totals,
};

/// Catalog, cart and pending invoice, owned by the presentation layer.
#[derive(Debug, Clone)]
pub struct InventoryCart {
    catalog: Catalog,
    cart: Cart,
    tax_rate: TaxRate,
    pending: Option<InvoiceSnapshot>,
}

impl InventoryCart {
    /// Starts with an empty cart and no pending invoice.
    pub fn new(catalog: Catalog, tax_rate: TaxRate) -> Self {
        InventoryCart {
            catalog,
            cart: Cart::new(),
            tax_rate,
            pending: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    // =========================================================================
    // Cart Commands
    // =========================================================================

    /// Adds `quantity` of a product to the cart.
    ///
    /// ## Errors
    /// - `ProductNotFound` if the id is not in the catalog
    /// - `InvalidQuantity` if `quantity <= 0`
    /// - `InsufficientStock` if cart quantity + `quantity` exceeds stock
    /// - `Validation(OutOfRange)` if the cart total would no longer fit in
    ///   `i64` cents; the cart is unchanged
    pub fn add(&mut self, product_id: &str, quantity: i64) -> CoreResult<CartLine> {
        let product = self.catalog.get(product_id)?;
        let mut next = self.cart.clone();
        let line = next.add(product, quantity)?;
        self.ensure_total_fits(&next)?;
        self.cart = next;
        Ok(line)
    }

    /// Removes a product's line. Absent lines are ignored.
    pub fn remove(&mut self, product_id: &str) {
        self.cart.remove(product_id);
    }

    /// Sets a line's quantity.
    ///
    /// `quantity <= 0` removes the line. A quantity above stock is clamped
    /// to stock *and* reported as `InsufficientStock`, so the caller can tell
    /// the user the request was truncated. Products without a cart line are
    /// left alone.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if !self.cart.contains(product_id) {
            return Ok(());
        }
        if quantity <= 0 {
            self.cart.remove(product_id);
            return Ok(());
        }

        let product = self.catalog.get(product_id)?;
        let mut next = self.cart.clone();
        let result = next.set_quantity(product, quantity);
        self.ensure_total_fits(&next)?;
        self.cart = next;
        result
    }

    /// Rejects a candidate cart whose subtotal plus tax overflows.
    fn ensure_total_fits(&self, cart: &Cart) -> CoreResult<()> {
        let total = cart
            .checked_subtotal(&self.catalog)
            .and_then(|subtotal| subtotal.checked_add(subtotal.calculate_tax(self.tax_rate)));

        match total {
            Some(_) => Ok(()),
            None => Err(ValidationError::OutOfRange {
                field: "cart total".to_string(),
                min: 0,
                max: i64::MAX,
            }
            .into()),
        }
    }

    /// Empties the cart. A pending invoice, if any, is kept.
    pub fn clear(&mut self) {
        self.cart.clear();
    }

    // =========================================================================
    // Checkout Commands
    // =========================================================================

    /// Snapshots the cart into a pending invoice, replacing any earlier one.
    ///
    /// Stock is not touched until `confirm`.
    pub fn checkout(&mut self) -> CoreResult<InvoiceSnapshot> {
        self.checkout_at(Local::now())
    }

    /// `checkout` with an explicit clock reading.
    pub fn checkout_at(&mut self, now: DateTime<Local>) -> CoreResult<InvoiceSnapshot> {
        let invoice = build_snapshot(&self.cart, &self.catalog, self.tax_rate, now)?;
        self.pending = Some(invoice.clone());
        Ok(invoice)
    }

    /// Commits the pending invoice: decrements stock for every line, clears
    /// the cart and returns the invoice number.
    ///
    /// All-or-nothing: every line is checked against live stock before any
    /// decrement. On `InsufficientStock` nothing changes and the invoice
    /// stays pending.
    pub fn confirm(&mut self) -> CoreResult<String> {
        let Some(invoice) = &self.pending else {
            return Err(CoreError::NoPendingInvoice);
        };

        for line in &invoice.lines {
            self.catalog.can_fulfil(&line.product_id, line.quantity)?;
        }
        for line in &invoice.lines {
            self.catalog.decrement_stock(&line.product_id, line.quantity)?;
        }

        let number = invoice.number.clone();
        self.pending = None;
        self.cart.clear();
        Ok(number)
    }

    /// Drops the pending invoice. Stock and cart are untouched.
    pub fn cancel(&mut self) -> CoreResult<()> {
        match self.pending.take() {
            Some(_) => Ok(()),
            None => Err(CoreError::NoPendingInvoice),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All products with live stock, in catalog order.
    pub fn list_products(&self) -> &[Product] {
        self.catalog.products()
    }

    /// Cart lines with names, prices and line totals.
    pub fn list_cart_lines(&self) -> Vec<CartLineView> {
        self.cart.views(&self.catalog)
    }

    /// Current totals, recomputed from cart and catalog on every call.
    pub fn totals(&self) -> Totals {
        Totals::from_subtotal(self.cart.subtotal(&self.catalog), self.tax_rate)
    }

    pub fn pending_invoice(&self) -> Option<&InvoiceSnapshot> {
        self.pending.as_ref()
    }

    pub fn state(&self) -> CheckoutState {
        if self.pending.is_some() {
            CheckoutState::PendingConfirmation
        } else {
            CheckoutState::Idle
        }
    }
}

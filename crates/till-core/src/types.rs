//! # Domain Types
//!
//! Plain data exchanged between the core and the presentation layer.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │     Totals      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  product_id     │   │  subtotal       │       │
//! │  │  name           │   │  quantity       │   │  tax            │       │
//! │  │  unit_price     │   └─────────────────┘   │  total          │       │
//! │  │  stock (live)   │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CartLineView   │   │ InvoiceSnapshot │   │  CheckoutState  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  line + name    │   │  number         │   │  Idle           │       │
//! │  │  unit_price     │   │  issued_at      │   │  Pending-       │       │
//! │  │  line_total     │   │  lines, totals  │   │  Confirmation   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Views and snapshots are derived; only `Product::stock` and the cart's own
//! lines are ever mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1300 bps = 13%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage such as `13.0` or `8.25`.
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Everything except `stock` is fixed once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Stable identifier, e.g. `P001`.
    pub id: String,

    /// Display name shown in the product grid and on the invoice.
    pub name: String,

    /// Price per unit.
    pub unit_price: Money,

    /// Units on hand. Only `InventoryCart::confirm` lowers it.
    pub stock: i64,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        stock: i64,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            unit_price,
            stock,
        }
    }

    /// Sold-out products stay listed but cannot be added.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// Checks whether `quantity` units can be taken from stock.
    #[inline]
    pub fn can_fulfil(&self, quantity: i64) -> bool {
        quantity <= self.stock
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product selection in the cart. At most one line exists per product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product_id: String,
    /// Always positive.
    pub quantity: i64,
}

/// A cart line joined with catalog data, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    /// `unit_price × quantity`
    pub line_total: Money,
}

// =============================================================================
// Totals
// =============================================================================

/// Cart or invoice totals. Never stored on the cart; always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl Totals {
    /// Derives tax and total from a subtotal.
    ///
    /// Tax is rounded once, on the subtotal, never per line.
    pub fn from_subtotal(subtotal: Money, rate: TaxRate) -> Self {
        let tax = subtotal.calculate_tax(rate);
        Totals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A frozen invoice line. Name and price are copied out of the catalog at
/// checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceLine {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

/// The pending invoice produced by `checkout`.
///
/// Immutable once built; `confirm` commits it and `cancel` discards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceSnapshot {
    /// `F-YYYYMMDD-HHMMSS-RRR`
    pub number: String,

    #[ts(as = "String")]
    pub issued_at: DateTime<Utc>,

    /// Rate the totals were computed with.
    pub tax_rate: TaxRate,

    pub lines: Vec<InvoiceLine>,

    pub totals: Totals,
}

// =============================================================================
// Checkout State
// =============================================================================

/// Where the checkout state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CheckoutState {
    /// No pending invoice.
    #[default]
    Idle,
    /// One invoice snapshot is waiting for confirm or cancel.
    PendingConfirmation,
}

// =============================================================================
// Unit Tests
// =============================================================================

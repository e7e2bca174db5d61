//! # till-core: Pure Business Logic for Till POS
//!
//! This crate holds the whole point-of-sale state machine: a fixed product
//! catalog with live stock, a cart built against that stock, tax-inclusive
//! totals, and the checkout → confirm/cancel invoice lifecycle.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Presentation layer (apps/till-terminal)               │   │
//! │  │   raw text ──► parse ──► confirm prompt ──► render tables       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands / queries                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │  invoice  │  │ inventory │  │   │
//! │  │   │  Product  │  │ CartLine  │  │  number   │  │ Inventory │  │   │
//! │  │   │  stock    │  │  Totals   │  │  snapshot │  │   Cart    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO BLOCKING ON USER INPUT               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, Totals, InvoiceSnapshot)
//! - [`money`] - Money type with integer arithmetic
//! - [`catalog`] - Product lookup and stock decrement
//! - [`cart`] - Cart lines keyed by product id
//! - [`invoice`] - Invoice numbers and snapshots
//! - [`inventory`] - The `InventoryCart` state machine
//! - [`validation`] - Input rules shared with the presentation layer
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{Catalog, InventoryCart, TaxRate};
//!
//! let mut pos = InventoryCart::new(Catalog::default_catalog(), TaxRate::from_bps(1300));
//!
//! pos.add("P001", 2).unwrap();
//! let totals = pos.totals();
//! assert_eq!(totals.subtotal.cents(), 1500);
//! assert_eq!(totals.tax.cents(), 195);
//! assert_eq!(totals.total.cents(), 1695);
//!
//! pos.checkout().unwrap();
//! pos.confirm().unwrap();
//! assert_eq!(pos.catalog().get("P001").unwrap().stock, 23);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod inventory;
pub mod invoice;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::InventoryCart;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default sales tax in basis points (13%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 1300;

/// Prefix of every invoice number (`F-YYYYMMDD-HHMMSS-RRR`).
pub const INVOICE_PREFIX: &str = "F";

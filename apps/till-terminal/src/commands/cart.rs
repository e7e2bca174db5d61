//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Pending  │────►│ Confirmed│       │
//! │  │  Cart    │     │          │     │ Invoice  │     │ (stock ↓)│       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       confirm_purchase                   │
//! │                   update_cart_item  (checkout.rs)                      │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating command answers with the whole cart and fresh totals.

use serde::Serialize;
use tracing::{debug, warn};
use till_core::validation::parse_quantity;
use till_core::{CartLineView, CoreError, Totals};

use crate::error::{ApiError, ErrorCode};
use crate::state::Session;

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineView>,
    pub totals: Totals,
}

impl From<&Session> for CartResponse {
    fn from(session: &Session) -> Self {
        CartResponse {
            lines: session.pos.list_cart_lines(),
            totals: session.pos.totals(),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(session: &Session) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(&*session)
}

/// Adds a product to the cart.
///
/// `quantity` is the raw user text; `None` means 1. Adding a product that is
/// already in the cart increases its line.
///
/// ## Errors
/// - `NOT_FOUND` for an unknown id
/// - `VALIDATION_ERROR` for a non-numeric or non-positive quantity
/// - `INSUFFICIENT_STOCK` if the line would exceed stock; the cart is unchanged
pub fn add_to_cart(
    session: &mut Session,
    product_id: &str,
    quantity: Option<&str>,
) -> Result<CartResponse, ApiError> {
    let quantity = match quantity {
        Some(raw) => parse_quantity(raw).map_err(CoreError::from)?,
        None => 1,
    };
    debug!(product_id = %product_id, quantity = %quantity, "add_to_cart command");

    session.pos.add(product_id, quantity)?;
    Ok(CartResponse::from(&*session))
}

/// Sets the quantity of a line already in the cart.
///
/// Text that is not a positive whole number removes the line. A quantity
/// above stock is clamped to stock; the clamp is kept and reported as an
/// `INSUFFICIENT_STOCK` error so the user sees what happened.
pub fn update_cart_item(
    session: &mut Session,
    product_id: &str,
    quantity: &str,
) -> Result<CartResponse, ApiError> {
    let quantity = match parse_quantity(quantity) {
        Ok(q) if q > 0 => q,
        _ => {
            debug!(
                product_id = %product_id,
                raw = %quantity,
                "update_cart_item with no usable quantity, removing line"
            );
            session.pos.remove(product_id);
            return Ok(CartResponse::from(&*session));
        }
    };
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    match session.pos.set_quantity(product_id, quantity) {
        Ok(()) => Ok(CartResponse::from(&*session)),
        Err(CoreError::InsufficientStock {
            product_id,
            available,
            requested,
        }) => {
            warn!(product_id = %product_id, available, requested, "Quantity clamped to stock");
            Err(ApiError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Only {} of {} in stock ({} requested); quantity set to {}",
                    available, product_id, requested, available
                ),
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// Removes a product's line from the cart.
pub fn remove_from_cart(session: &mut Session, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");
    session.pos.remove(product_id);
    CartResponse::from(&*session)
}

/// Clears all lines from the cart.
pub fn clear_cart(session: &mut Session) -> CartResponse {
    debug!("clear_cart command");
    session.pos.clear();
    CartResponse::from(&*session)
}

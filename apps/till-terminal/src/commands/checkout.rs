//! # Checkout Commands
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   checkout ──────► pending invoice ──── confirm ────► stock decremented │
//! │   (snapshot,            │                             cart cleared      │
//! │    no stock change)     │                                               │
//! │                         └────────── cancel ─────────► nothing changes  │
//! │                                                                         │
//! │   A second checkout replaces the pending invoice.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};
use till_core::{CoreError, InvoiceSnapshot, Totals};

use crate::error::ApiError;
use crate::state::Session;

/// Result of a confirmed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResponse {
    pub invoice_number: String,
    pub totals: Totals,
    pub items: i64,
}

/// Freezes the cart into a pending invoice. Stock is not touched.
///
/// ## Errors
/// - `CART_ERROR` if the cart is empty
pub fn checkout(session: &mut Session) -> Result<InvoiceSnapshot, ApiError> {
    debug!("checkout command");

    let invoice = session.pos.checkout()?;
    info!(
        invoice_number = %invoice.number,
        lines = invoice.lines.len(),
        total = %invoice.totals.total,
        "Invoice created"
    );
    Ok(invoice)
}

/// Returns the pending invoice.
///
/// ## Errors
/// - `INVOICE_ERROR` if nothing is pending
pub fn get_pending_invoice(session: &Session) -> Result<InvoiceSnapshot, ApiError> {
    debug!("get_pending_invoice command");
    session
        .pos
        .pending_invoice()
        .cloned()
        .ok_or_else(|| CoreError::NoPendingInvoice.into())
}

/// Commits the pending invoice, decrementing stock for every line.
///
/// All-or-nothing: if any line no longer fits in stock nothing changes and
/// the invoice stays pending.
pub fn confirm_purchase(session: &mut Session) -> Result<ConfirmResponse, ApiError> {
    debug!("confirm_purchase command");

    let (totals, items) = match session.pos.pending_invoice() {
        Some(invoice) => (invoice.totals, invoice.total_quantity()),
        None => (Totals::default(), 0),
    };

    match session.pos.confirm() {
        Ok(invoice_number) => {
            info!(
                invoice_number = %invoice_number,
                total = %totals.total,
                items,
                "Purchase confirmed"
            );
            Ok(ConfirmResponse {
                invoice_number,
                totals,
                items,
            })
        }
        Err(e) => {
            warn!(error = %e, "Purchase not confirmed");
            Err(e.into())
        }
    }
}

/// Discards the pending invoice. Cart and stock are unchanged.
pub fn cancel_invoice(session: &mut Session) -> Result<(), ApiError> {
    debug!("cancel_invoice command");
    session.pos.cancel()?;
    info!("Pending invoice cancelled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::error::ErrorCode;
    use crate::state::ConfigState;
    use till_core::CheckoutState;

    fn session() -> Session {
        Session::new(ConfigState::default()).unwrap()
    }

    fn stock_of(session: &Session, id: &str) -> i64 {
        session.pos.catalog().get(id).unwrap().stock
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut session = session();
        let err = checkout(&mut session).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(session.pos.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_checkout_then_confirm() {
        let mut session = session();
        add_to_cart(&mut session, "P001", Some("2")).unwrap();

        let invoice = checkout(&mut session).unwrap();
        assert!(invoice.number.starts_with("F-"));
        assert_eq!(invoice.totals.total.cents(), 1695);
        assert_eq!(stock_of(&session, "P001"), 25);
        assert_eq!(get_pending_invoice(&session).unwrap(), invoice);

        let confirmed = confirm_purchase(&mut session).unwrap();
        assert_eq!(confirmed.invoice_number, invoice.number);
        assert_eq!(confirmed.items, 2);
        assert_eq!(confirmed.totals.total.cents(), 1695);

        assert_eq!(stock_of(&session, "P001"), 23);
        assert!(session.pos.cart().is_empty());
        assert_eq!(session.pos.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_confirm_without_checkout() {
        let mut session = session();
        let err = confirm_purchase(&mut session).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvoiceError);

        let err = get_pending_invoice(&session).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvoiceError);
    }

    #[test]
    fn test_cancel_keeps_cart_and_stock() {
        let mut session = session();
        add_to_cart(&mut session, "P005", Some("3")).unwrap();
        checkout(&mut session).unwrap();

        cancel_invoice(&mut session).unwrap();

        assert_eq!(session.pos.state(), CheckoutState::Idle);
        assert_eq!(session.pos.cart().quantity_of("P005"), 3);
        assert_eq!(stock_of(&session, "P005"), 12);

        let err = cancel_invoice(&mut session).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvoiceError);
    }
}

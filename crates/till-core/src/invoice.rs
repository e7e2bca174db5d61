//! # Invoice
//!
//! Invoice numbers and the snapshot taken at checkout.
//!
//! ## Invoice Number Format
//! ```text
//! F-20261015-143207-482
//! │ │        │      └── random suffix, 100-999
//! │ │        └───────── local time HHMMSS
//! │ └────────────────── local date YYYYMMDD
//! └──────────────────── prefix
//! ```
//!
//! ## Known Limitation
//! Uniqueness is best-effort: two checkouts in the same wall-clock second
//! share a timestamp and then have a 1-in-900 chance of drawing the same
//! suffix. Acceptable for a simulator; a real register would use a
//! persistent counter.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use rand::Rng;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::types::{InvoiceLine, InvoiceSnapshot, TaxRate, Totals};
use crate::INVOICE_PREFIX;

/// Lowest and highest random suffix, inclusive.
pub const SUFFIX_RANGE: (u16, u16) = (100, 999);

/// Formats `F-YYYYMMDD-HHMMSS-RRR` from a local timestamp and a suffix.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use till_core::invoice::format_invoice_number;
///
/// let at = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap().and_hms_opt(9, 5, 2).unwrap();
/// assert_eq!(format_invoice_number(&at, 482), "F-20260307-090502-482");
/// ```
pub fn format_invoice_number(at: &NaiveDateTime, suffix: u16) -> String {
    format!(
        "{}-{}-{:03}",
        INVOICE_PREFIX,
        at.format("%Y%m%d-%H%M%S"),
        suffix
    )
}

/// Draws a suffix in `SUFFIX_RANGE`.
pub fn random_suffix() -> u16 {
    rand::thread_rng().gen_range(SUFFIX_RANGE.0..=SUFFIX_RANGE.1)
}

/// Generates a fresh invoice number for the given local time.
pub fn generate_invoice_number(at: &DateTime<Local>) -> String {
    format_invoice_number(&at.naive_local(), random_suffix())
}

/// Freezes the cart into an invoice.
///
/// Names, prices and totals are copied out of `catalog` so the snapshot no
/// longer depends on it. Stock is not touched.
///
/// ## Returns
/// - `Err(EmptyCart)` if the cart has no lines
pub fn build_snapshot(
    cart: &Cart,
    catalog: &Catalog,
    tax_rate: TaxRate,
    issued_at: DateTime<Local>,
) -> CoreResult<InvoiceSnapshot> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let lines: Vec<InvoiceLine> = cart
        .views(catalog)
        .into_iter()
        .map(|view| InvoiceLine {
            product_id: view.product_id,
            name: view.name,
            quantity: view.quantity,
            unit_price: view.unit_price,
            line_total: view.line_total,
        })
        .collect();

    let subtotal = lines.iter().map(|l| l.line_total).sum();

    Ok(InvoiceSnapshot {
        number: generate_invoice_number(&issued_at),
        issued_at: issued_at.with_timezone(&Utc),
        tax_rate,
        lines,
        totals: Totals::from_subtotal(subtotal, tax_rate),
    })
}

impl InvoiceSnapshot {
    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Pretty JSON for receipts or a web front end.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn fixed_time() -> DateTime<Local> {
        let naive = NaiveDate::from_ymd_opt(2026, 10, 15)
            .unwrap()
            .and_hms_opt(14, 32, 7)
            .unwrap();
        Local.from_local_datetime(&naive).earliest().unwrap()
    }

    #[test]
    fn test_format_pads_every_component() {
        let at = NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(format_invoice_number(&at, 100), "F-20260102-030405-100");
    }

    #[test]
    fn test_random_suffix_in_range() {
        for _ in 0..1000 {
            let suffix = random_suffix();
            assert!((100..=999).contains(&suffix), "suffix {} out of range", suffix);
        }
    }

    #[test]
    fn test_generated_number_shape() {
        let number = generate_invoice_number(&fixed_time());
        assert!(number.starts_with("F-20261015-143207-"));

        let suffix: u16 = number.rsplit('-').next().unwrap().parse().unwrap();
        assert!((100..=999).contains(&suffix));
        assert_eq!(number.len(), "F-YYYYMMDD-HHMMSS-RRR".len());
    }

    #[test]
    fn test_build_snapshot_rejects_empty_cart() {
        let catalog = Catalog::default_catalog();
        let result = build_snapshot(&Cart::new(), &catalog, TaxRate::default(), fixed_time());
        assert_eq!(result, Err(CoreError::EmptyCart));
    }

    #[test]
    fn test_build_snapshot_copies_lines_and_totals() {
        let catalog = Catalog::default_catalog();
        let mut cart = Cart::new();
        cart.add(catalog.get("P001").unwrap(), 2).unwrap();
        cart.add(catalog.get("P002").unwrap(), 1).unwrap();

        let invoice =
            build_snapshot(&cart, &catalog, TaxRate::from_bps(1300), fixed_time()).unwrap();

        assert_eq!(invoice.lines.len(), 2);
        assert_eq!(invoice.lines[0].name, "Specialty coffee 340g");
        assert_eq!(invoice.lines[0].line_total.cents(), 1500);
        assert_eq!(invoice.total_quantity(), 3);

        // $20.00 subtotal, $2.60 tax
        assert_eq!(invoice.totals.subtotal.cents(), 2000);
        assert_eq!(invoice.totals.tax.cents(), 260);
        assert_eq!(invoice.totals.total.cents(), 2260);
        assert_eq!(invoice.issued_at, fixed_time().with_timezone(&Utc));
    }

    #[test]
    fn test_to_json() {
        let catalog = Catalog::default_catalog();
        let mut cart = Cart::new();
        cart.add(catalog.get("P001").unwrap(), 2).unwrap();

        let invoice = build_snapshot(&cart, &catalog, TaxRate::default(), fixed_time()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&invoice.to_json().unwrap()).unwrap();

        assert_eq!(json["number"], invoice.number.as_str());
        assert_eq!(json["lines"][0]["productId"], "P001");
        assert_eq!(json["totals"]["total"], 1695);
    }
}

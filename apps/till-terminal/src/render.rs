//! Table rendering for products, cart and invoices.

use chrono::Local;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use till_core::{InvoiceSnapshot, Product, Totals};

use crate::commands::{CartResponse, ConfirmResponse};
use crate::state::ConfigState;

fn finish(builder: Builder, numeric: std::ops::Range<usize>) -> String {
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(numeric), Alignment::right());
    table.to_string()
}

/// Subtotal, tax and total, labels and values right-aligned in two columns.
fn totals_block(totals: &Totals, config: &ConfigState) -> String {
    let rows = [
        ("Subtotal:".to_string(), config.format_currency(totals.subtotal)),
        (format!("Tax ({}):", config.tax_label()), config.format_currency(totals.tax)),
        ("Total:".to_string(), config.format_currency(totals.total)),
    ];

    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);

    rows.iter()
        .map(|(label, value)| format!(" {label:>label_width$} {value:>value_width$}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The catalog with live stock. Sold-out products stay listed.
pub fn products(products: &[Product], config: &ConfigState) -> String {
    if products.is_empty() {
        return "No products in the catalog.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Product", "Price", "Stock", ""]);

    for product in products {
        let status = if product.is_available() { "" } else { "sold out" };
        builder.push_record([
            product.id.clone(),
            product.name.clone(),
            config.format_currency(product.unit_price),
            product.stock.to_string(),
            status.to_string(),
        ]);
    }

    finish(builder, 2..4)
}

/// Cart lines followed by the totals block.
pub fn cart(cart: &CartResponse, config: &ConfigState) -> String {
    if cart.lines.is_empty() {
        return "Cart is empty.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Product", "Qty", "Unit", "Total"]);

    for line in &cart.lines {
        builder.push_record([
            line.product_id.clone(),
            line.name.clone(),
            line.quantity.to_string(),
            config.format_currency(line.unit_price),
            config.format_currency(line.line_total),
        ]);
    }

    format!(
        "{}\n{}",
        finish(builder, 2..5),
        totals_block(&cart.totals, config)
    )
}

/// The pending invoice, with header and totals.
pub fn invoice(invoice: &InvoiceSnapshot, config: &ConfigState) -> String {
    let issued = invoice.issued_at.with_timezone(&Local);

    let mut builder = Builder::default();
    builder.push_record(["Product", "Qty", "Unit", "Total"]);
    for line in &invoice.lines {
        builder.push_record([
            line.name.clone(),
            line.quantity.to_string(),
            config.format_currency(line.unit_price),
            config.format_currency(line.line_total),
        ]);
    }

    format!(
        "{}\nInvoice #{}\nDate: {}\n{}\n{}",
        config.store_name,
        invoice.number,
        issued.format("%Y-%m-%d %H:%M:%S"),
        finish(builder, 1..4),
        totals_block(&invoice.totals, config)
    )
}

pub fn confirmed(response: &ConfirmResponse, config: &ConfigState) -> String {
    format!(
        "Purchase confirmed! Invoice #{} ({} items, {}). Inventory updated.",
        response.invoice_number,
        response.items,
        config.format_currency(response.totals.total)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{CartLineView, Money, TaxRate};

    #[test]
    fn test_products_marks_sold_out() {
        let config = ConfigState::default();
        let list = vec![
            Product::new("P001", "Specialty coffee 340g", Money::from_cents(750), 25),
            Product::new("P004", "French press 600ml", Money::from_cents(2290), 0),
        ];

        let out = products(&list, &config);
        let press_row = out.lines().find(|l| l.contains("P004")).unwrap();
        let coffee_row = out.lines().find(|l| l.contains("P001")).unwrap();

        assert!(out.contains("$7.50"));
        assert!(press_row.contains("sold out"));
        assert!(!coffee_row.contains("sold out"));
    }

    #[test]
    fn test_cart_with_totals() {
        let config = ConfigState::default();
        let response = CartResponse {
            lines: vec![CartLineView {
                product_id: "P001".into(),
                name: "Specialty coffee 340g".into(),
                quantity: 2,
                unit_price: Money::from_cents(750),
                line_total: Money::from_cents(1500),
            }],
            totals: Totals::from_subtotal(Money::from_cents(1500), TaxRate::from_bps(1300)),
        };

        let out = cart(&response, &config);

        assert!(out.contains("Specialty coffee 340g"));
        assert!(out.contains("Subtotal: $15.00"));
        assert!(out.contains("Tax (13%):  $1.95"));
        assert!(out.contains("Total: $16.95"));
    }

    #[test]
    fn test_empty_cart() {
        let response = CartResponse {
            lines: vec![],
            totals: Totals::default(),
        };
        assert_eq!(cart(&response, &ConfigState::default()), "Cart is empty.");
    }
}

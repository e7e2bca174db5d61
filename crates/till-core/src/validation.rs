//! # Validation Module
//!
//! Rules for catalog data and for raw text typed by a cashier.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation layer                                           │
//! │  └── parse_quantity: trim raw text, require a whole number             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog construction                                         │
//! │  └── validate_product: id, name, price, stock                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: InventoryCart                                                │
//! │  └── business rules: positive quantity, stock limits                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::num::IntErrorKind;

use crate::error::ValidationError;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_PRODUCT_ID_LEN: usize = 32;
const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Highest unit price a catalog accepts: $10,000,000.00.
pub const MAX_UNIT_PRICE_CENTS: i64 = 1_000_000_000;

/// Highest stock a catalog accepts.
///
/// With `MAX_UNIT_PRICE_CENTS` this keeps any single line total
/// (`price × quantity ≤ price × stock`) at or below 10^18 cents.
pub const MAX_STOCK: i64 = 1_000_000_000;

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a product id.
///
/// ## Rules
/// - Must not be empty
/// - At most 32 characters
/// - Letters, digits, hyphens and underscores only
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_product_id;
///
/// assert!(validate_product_id("P001").is_ok());
/// assert!(validate_product_id("").is_err());
/// assert!(validate_product_id("P 001").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    if id.len() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "product id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "product id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name: non-empty, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Runs every field rule against a product.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_product_name(&product.name)?;

    if !(0..=MAX_UNIT_PRICE_CENTS).contains(&product.unit_price.cents()) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE_CENTS,
        });
    }

    if !(0..=MAX_STOCK).contains(&product.stock) {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: MAX_STOCK,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Raw Input
// =============================================================================

/// Parses a quantity typed by the user.
///
/// Only checks that the text is a whole number. Whether zero or a negative
/// value is acceptable depends on the command, so that decision is left to
/// `InventoryCart`. Digits beyond the `i64` range saturate, so an absurdly
/// large request still reaches the stock check.
///
/// ## Example
/// ```rust
/// use till_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity(" 3 ").unwrap(), 3);
/// assert_eq!(parse_quantity("0").unwrap(), 0);
/// assert_eq!(parse_quantity("99999999999999999999").unwrap(), i64::MAX);
/// assert!(parse_quantity("2.5").is_err());
/// assert!(parse_quantity("").is_err());
/// ```
pub fn parse_quantity(raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "quantity".to_string(),
        });
    }

    match raw.parse::<i64>() {
        Ok(quantity) => Ok(quantity),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(ValidationError::InvalidFormat {
                field: "quantity".to_string(),
                reason: format!("'{}' is not a whole number", raw),
            }),
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Rejected cart / checkout commands              │
//! │  └── ValidationError  - Bad catalog data or raw input                  │
//! │                                                                         │
//! │  till-terminal errors (app)                                            │
//! │  ├── ConfigError      - Config file / env problems                     │
//! │  └── ApiError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is a deterministic rejection: state is left as it was
//! (the one exception is the clamp in `InventoryCart::set_quantity`), so a
//! caller can fix the input and retry immediately.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by catalog, cart and checkout operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No product with this id exists in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Quantity is zero or negative.
    #[error("Invalid quantity: {requested}")]
    InvalidQuantity { requested: i64 },

    /// Requested amount exceeds available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// add P001 × 30
    ///      │
    ///      ▼
    /// Check stock: available=25
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: "P001", available: 25, requested: 30 }
    ///      │
    ///      ▼
    /// UI shows: "Only 25 of P001 in stock"
    /// ```
    #[error("Insufficient stock for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// Checkout was requested with no lines in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Confirm or cancel was requested with nothing pending.
    #[error("No pending invoice")]
    NoPendingInvoice,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while building a catalog and while parsing raw text from the
/// presentation layer, before any business rule runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., "abc" for a quantity).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two products with the same id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message() {
        let err = CoreError::InsufficientStock {
            product_id: "P001".to_string(),
            available: 25,
            requested: 30,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for P001: available 25, requested 30"
        );
    }

    #[test]
    fn test_lifecycle_error_messages() {
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
        assert_eq!(CoreError::NoPendingInvoice.to_string(), "No pending invoice");
        assert_eq!(
            CoreError::InvalidQuantity { requested: -2 }.to_string(),
            "Invalid quantity: -2"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Duplicate {
            field: "product id".to_string(),
            value: "P001".to_string(),
        };
        assert_eq!(validation_err.to_string(), "product id 'P001' already exists");

        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

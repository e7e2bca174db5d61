//! # Error Types
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Terminal                           │
//! │                                                                         │
//! │  "add P001 30"                                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart ── CoreError::InsufficientStock ──┐        │
//! │                                                                │        │
//! │                                       From<CoreError>          ▼        │
//! │                                                          ApiError       │
//! │                                                                │        │
//! │  error[INSUFFICIENT_STOCK]: Not enough stock for P001 ... ◄────┘        │
//! │                                                                         │
//! │  The REPL keeps running; the user corrects the input and retries.      │
//! │                                                                         │
//! │  Startup failures (bad config file, catalog) are AppError and end      │
//! │  the process with exit code 1.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use till_core::CoreError;

use crate::state::ConfigError;

/// A rejected command, as shown to the user.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Not enough stock for P001: 25 available, 30 requested"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message for display
    pub message: String,
}

/// Error codes for rejected commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product id
    NotFound,

    /// Bad quantity or malformed input
    ValidationError,

    /// Requested more than is in stock
    InsufficientStock,

    /// Cart operation not possible (e.g. checkout of an empty cart)
    CartError,

    /// Nothing pending to confirm or cancel
    InvoiceError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::CartError => "CART_ERROR",
            ErrorCode::InvoiceError => "INVOICE_ERROR",
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts core errors to user-facing errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::InvalidQuantity { requested } => ApiError::validation(format!(
                "Invalid quantity {}: enter a whole number greater than 0",
                requested
            )),
            CoreError::InsufficientStock {
                product_id,
                available,
                requested,
            } => ApiError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Not enough stock for {}: {} available, {} requested",
                    product_id, available, requested
                ),
            ),
            CoreError::EmptyCart => ApiError::new(
                ErrorCode::CartError,
                "Cart is empty; add products before checking out",
            ),
            CoreError::NoPendingInvoice => ApiError::new(
                ErrorCode::InvoiceError,
                "No pending invoice; run `checkout` first",
            ),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error[{}]: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

/// Failures that stop the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

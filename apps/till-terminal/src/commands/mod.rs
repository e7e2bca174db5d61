//! # Commands Module
//!
//! One function per user action, each taking the session it acts on.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Product listing
//! ├── cart.rs      ◄─── Cart manipulation
//! └── checkout.rs  ◄─── Checkout, confirm, cancel
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Terminal Command Flow                                │
//! │                                                                         │
//! │  > add P001 2                                                           │
//! │         │                                                               │
//! │         │ (clap parses the line, repl.rs)                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(&mut session, "P001", Some("2"))           │
//! │         │                                                               │
//! │         │ Result<CartResponse, ApiError>                                │
//! │         ▼                                                               │
//! │  render::cart(&response, &session.config)  ─►  table on stdout         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands return data, never text. Rendering lives in `render.rs` so the
//! same responses could back another front end.

pub mod cart;
pub mod checkout;
pub mod product;

pub use cart::CartResponse;
pub use checkout::ConfirmResponse;

//! # State Module
//!
//! Application state for the terminal front end.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │   ConfigState (read-only after startup)                                 │
//! │        │                                                                │
//! │        │ catalog(), tax_rate()                                          │
//! │        ▼                                                                │
//! │   Session ──owns──► InventoryCart (catalog, cart, pending invoice)      │
//! │        │                                                                │
//! │        └──► &mut Session handed to every command                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{ConfigError, ConfigState, ProductConfig};
pub use session::Session;

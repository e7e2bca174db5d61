//! # Till Terminal Library
//!
//! Interactive front end for `till-core`.
//!
//! ## Module Structure
//! ```text
//! till_terminal/
//! ├── lib.rs          ◄─── You are here (startup, tracing)
//! ├── main.rs         ◄─── Process arguments, exit code
//! ├── error.rs        ◄─── ApiError (per command) and AppError (fatal)
//! ├── repl.rs         ◄─── Line parsing, prompts, the loop
//! ├── render.rs       ◄─── Tables and totals
//! ├── commands/
//! │   ├── product.rs  ◄─── list_products
//! │   ├── cart.rs     ◄─── add, qty, remove, clear
//! │   └── checkout.rs ◄─── checkout, confirm, cancel
//! └── state/
//!     ├── config.rs   ◄─── ConfigState (TOML + env + flags)
//!     └── session.rs  ◄─── Session (the InventoryCart being driven)
//! ```
//!
//! ## Output Streams
//! Tables and prompts go to stdout; logs go to stderr so they never mix
//! with what the cashier reads.

pub mod commands;
pub mod error;
pub mod render;
pub mod repl;
pub mod state;

use std::io;
use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use error::AppError;
use state::{ConfigState, Session};

/// Loads configuration, builds the session and runs the loop on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load config ─── file (--config / TILL_CONFIG), then TILL_* env     │
/// │  2. Apply --tax-rate / TILL_TAX_RATE                                    │
/// │  3. Build catalog and InventoryCart                                     │
/// │  4. Run the REPL until `quit` or end of input                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(config_path: Option<&Path>, tax_rate: Option<f64>) -> Result<(), AppError> {
    info!("Starting Till POS terminal");

    let mut config = ConfigState::load(config_path)?;
    if let Some(pct) = tax_rate {
        config.set_tax_percentage(pct)?;
    }
    info!(
        store = %config.store_name,
        tax_rate_bps = config.tax_rate_bps,
        custom_catalog = config.products.is_some(),
        "Configuration loaded"
    );

    let mut session = Session::new(config)?;
    info!(products = session.pos.catalog().len(), "Catalog ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run_repl(&mut session, stdin.lock(), stdout.lock())?;

    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=till_terminal=trace` - Trace this crate only
/// - Default: info, debug for this crate
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,till_terminal=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

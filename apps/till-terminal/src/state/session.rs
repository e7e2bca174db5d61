//! # Session State
//!
//! The one `InventoryCart` this terminal drives, plus the config used to
//! build and render it.
//!
//! The terminal is the only writer, so the session is owned outright and
//! passed as `&mut Session` to each command. No `Arc`/`Mutex` needed.

use till_core::InventoryCart;

use super::config::{ConfigError, ConfigState};

/// Owned POS state for one terminal run.
#[derive(Debug)]
pub struct Session {
    pub pos: InventoryCart,
    pub config: ConfigState,
}

impl Session {
    /// Builds the catalog described by `config` and starts an empty cart.
    pub fn new(config: ConfigState) -> Result<Self, ConfigError> {
        let catalog = config.catalog()?;
        let pos = InventoryCart::new(catalog, config.tax_rate());
        Ok(Session { pos, config })
    }
}

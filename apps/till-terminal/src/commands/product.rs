//! # Product Commands

use tracing::debug;
use till_core::Product;

use crate::state::Session;

/// Lists every product with its live stock, in catalog order.
///
/// Sold-out products are included; the renderer marks them.
pub fn list_products(session: &Session) -> Vec<Product> {
    debug!("list_products command");
    session.pos.list_products().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConfigState;

    #[test]
    fn test_list_products_reflects_live_stock() {
        let mut session = Session::new(ConfigState::default()).unwrap();
        session.pos.add("P004", 10).unwrap();
        session.pos.checkout().unwrap();
        session.pos.confirm().unwrap();

        let products = list_products(&session);
        let press = products.iter().find(|p| p.id == "P004").unwrap();

        assert_eq!(products.len(), 5);
        assert_eq!(products[0].id, "P001");
        assert_eq!(press.stock, 0);
        assert!(!press.is_available());
    }
}

//! # Catalog
//!
//! The fixed set of products, loaded once at startup, with live stock.
//!
//! Lookups are by product id; listing keeps load order so the product grid
//! is stable between renders.

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_product;

/// Read-mostly product catalog.
///
/// ## Invariants
/// - Product ids are unique
/// - Every product passed `validate_product` (non-negative price and stock)
/// - `stock` only goes down, through `decrement_stock`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, rejecting invalid products and duplicate ids.
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());

        for product in &products {
            validate_product(product)?;

            if !seen.insert(product.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "product id".to_string(),
                    value: product.id.clone(),
                }
                .into());
            }
        }

        Ok(Catalog { products })
    }

    /// The demo coffee-shop catalog.
    pub fn default_catalog() -> Self {
        Catalog {
            products: vec![
                Product::new("P001", "Specialty coffee 340g", Money::from_major_minor(7, 50), 25),
                Product::new("P002", "Ceramic mug 12oz", Money::from_major_minor(5, 0), 40),
                Product::new("P003", "V60 filters (x100)", Money::from_major_minor(4, 25), 30),
                Product::new("P004", "French press 600ml", Money::from_major_minor(22, 90), 10),
                Product::new("P005", "Steel thermos 500ml", Money::from_major_minor(16, 50), 12),
            ],
        }
    }

    /// All products in load order, with live stock.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> CoreResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Checks that `quantity` units of `id` could be taken right now,
    /// without touching stock.
    pub fn can_fulfil(&self, id: &str, quantity: i64) -> CoreResult<()> {
        let product = self.get(id)?;
        if product.can_fulfil(quantity) {
            Ok(())
        } else {
            Err(CoreError::InsufficientStock {
                product_id: id.to_string(),
                available: product.stock,
                requested: quantity,
            })
        }
    }

    /// Takes `quantity` units out of stock.
    ///
    /// Must be called exactly once per confirmed invoice line; a second call
    /// would subtract again.
    pub fn decrement_stock(&mut self, id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity {
                requested: quantity,
            });
        }

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        if quantity > product.stock {
            return Err(CoreError::InsufficientStock {
                product_id: id.to_string(),
                available: product.stock,
                requested: quantity,
            });
        }

        product.stock -= quantity;
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::default_catalog()
    }
}

//! In-memory product catalog. Seeded with the sample product list unless
//! `CATALOG_PATH` points at a JSON array of products.

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use crate::models::{Category, Product, ProductId};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
}

/// Read-only product list shared by all handlers.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.price.is_sign_negative() && !product.price.is_zero() {
                return Err(CatalogError::NegativePrice(product.id));
            }
        }
        Ok(Self { products })
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        info!(
            path = %path.display(),
            count = products.len(),
            "Loaded product catalog from file"
        );
        Self::new(products)
    }

    /// The sample catalog served when no file is configured.
    pub fn seeded() -> Self {
        let products = vec![
            Product::new(1, ".NET 8 Enterprise License", Category::Software, Decimal::new(99999, 2))
                .with_description("Enterprise-grade license for .NET 8 development framework."),
            Product::new(2, "OIDC Integration Package", Category::Service, Decimal::new(49999, 2))
                .with_description("Complete OIDC integration service with implementation support."),
            Product::new(3, "Cloud Hosting - Premium", Category::Infrastructure, Decimal::new(19999, 2))
                .with_description("Premium cloud hosting solution for .NET applications."),
            Product::new(4, "Developer Support Plan", Category::Support, Decimal::new(29999, 2))
                .with_description("24/7 developer support for your .NET applications."),
            Product::new(5, "Authentication Middleware", Category::Software, Decimal::new(14999, 2))
                .with_description("Advanced authentication middleware for .NET applications."),
            Product::new(6, "Identity Server Setup", Category::Service, Decimal::new(89999, 2))
                .with_description(
                    "Complete setup and configuration of Identity Server for your applications.",
                ),
        ];
        Self { products }
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

use crate::core::catalog::store::CatalogStore;
use crate::core::models::product::Product;
use anyhow::Error;
use async_trait::async_trait;
use moka::sync::{Cache, CacheBuilder};

/// Local catalog for development and tests.
pub struct LocalCatalog {
    products: Cache<String, Product>,
}

impl LocalCatalog {
    pub fn new() -> Self {
        Self {
            products: CacheBuilder::default().build(),
        }
    }

    pub fn insert(&self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    pub fn evict(&self, id: &str) {
        self.products.invalidate(id);
    }
}

impl Default for LocalCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for LocalCatalog {
    async fn get(&self, id: &str) -> Result<Option<Product>, Error> {
        Ok(self.products.get(id))
    }

    async fn list(&self) -> Result<Vec<Product>, Error> {
        Ok(self.products.iter().map(|(_, product)| product).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::product::ProductBuilder;

    #[tokio::test]
    async fn test_get_resolves_inserted_product() {
        let catalog = LocalCatalog::new();
        catalog.insert(ProductBuilder::default().id("p1").build().unwrap());

        assert!(catalog.get("p1").await.unwrap().is_some());
        assert!(catalog.get("p2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_evicted_product_no_longer_resolves() {
        let catalog = LocalCatalog::new();
        catalog.insert(ProductBuilder::default().id("p1").build().unwrap());
        catalog.evict("p1");

        assert!(catalog.get("p1").await.unwrap().is_none());
        assert!(catalog.list().await.unwrap().is_empty());
    }
}

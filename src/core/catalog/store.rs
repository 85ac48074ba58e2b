use crate::core::models::product::Product;
use anyhow::Error;
use async_trait::async_trait;

/// Read-only catalog backend. `None` from `get` means the product
/// is gone from the catalog, a normal outcome rather than a failure.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Product>, Error>;

    /// Full collection scan. Acceptable only because the catalog is
    /// assumed small; there is no pagination.
    async fn list(&self) -> Result<Vec<Product>, Error>;
}

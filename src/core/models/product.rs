use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Opaque catalog product identifier. Uniqueness is owned by the
/// remote catalog, never enforced locally.
pub type ProductId = String;

/// Catalog product record as stored in the products collection.
/// Read-only from the storefront's perspective; only the catalog
/// tooling writes these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, Builder)]
#[builder(setter(into), default)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    /// Unit price, non-negative. All items in one cart are assumed
    /// to share a currency.
    pub price: f64,
    pub currency: String,
    pub image_url: String,
    pub description: String,
    pub rating: f64,
    pub reviews: u32,
    pub is_favorite: bool,
    pub stock: u32,
    pub tags: Vec<String>,
}

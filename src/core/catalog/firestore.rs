use crate::core::catalog::store::CatalogStore;
use crate::core::models::product::Product;
use anyhow::Error;
use async_trait::async_trait;
use firestore::FirestoreDb;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Catalog backed by a Firestore collection of product documents.
pub struct FirestoreCatalog {
    db: Arc<FirestoreDb>,
    collection: String,
}

impl FirestoreCatalog {
    pub fn new(db: Arc<FirestoreDb>, collection: impl Into<String>) -> Self {
        Self {
            db,
            collection: collection.into(),
        }
    }
}

#[async_trait]
impl CatalogStore for FirestoreCatalog {
    async fn get(&self, id: &str) -> Result<Option<Product>, Error> {
        let product = self
            .db
            .fluent()
            .select()
            .by_id_in(self.collection.as_str())
            .obj()
            .one(id)
            .await
            .map_err(|e| {
                error!(
                    "Firestore product fetch failed for {} in {}: {}",
                    id, self.collection, e
                );
                e
            })?;

        Ok(product)
    }

    async fn list(&self) -> Result<Vec<Product>, Error> {
        let docs = self
            .db
            .fluent()
            .select()
            .from(self.collection.as_str())
            .query()
            .await
            .map_err(|e| {
                error!(
                    "Firestore query failed for collection {}: {}",
                    self.collection, e
                );
                e
            })?;

        let mut products = Vec::with_capacity(docs.len());

        // Malformed documents are skipped rather than failing the
        // whole listing; the catalog tooling owns fixing them.
        for doc in docs {
            match FirestoreDb::deserialize_doc_to::<Product>(&doc) {
                Ok(product) => products.push(product),
                Err(err) => {
                    warn!("Failed to deserialize product document {}: {}", doc.name, err);
                }
            }
        }

        debug!(
            "Loaded {} products from Firestore collection {}",
            products.len(),
            self.collection
        );

        Ok(products)
    }
}

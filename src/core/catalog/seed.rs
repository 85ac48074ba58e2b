use crate::core::models::product::Product;
use anyhow::Error;
use firestore::FirestoreDb;
use tracing::{error, info};

/// Uploads product records to the catalog collection, keyed by their
/// own ids. An existing document with the same id is overwritten, so
/// re-running a seed is idempotent. Catalog tooling only; the
/// storefront itself never writes products.
pub async fn seed_products(
    db: &FirestoreDb,
    collection: &str,
    products: &[Product],
) -> Result<usize, Error> {
    for product in products {
        db.fluent()
            .update()
            .in_col(collection)
            .document_id(&product.id)
            .object(product)
            .execute::<()>()
            .await
            .map_err(|e| {
                error!("Failed to seed product {} into {}: {}", product.id, collection, e);
                e
            })?;

        info!("Seeded product {} into {}", product.id, collection);
    }

    Ok(products.len())
}

use crate::app::config::GocartConfig;
use crate::core::cart::{CartReconciler, CartStore};
use crate::core::catalog::{CatalogStore, FirestoreCatalog, LocalCatalog};
use crate::core::identity::IdentitySession;
use crate::core::kv::{FileStore, KeyValueStore};
use crate::core::orders::{FirestoreOrders, LocalOrders, OrderBuilder, OrderHistory, OrderStore};
use anyhow::Error;
use firestore::FirestoreDb;
use std::sync::Arc;
use tracing::info;

/// Explicitly constructed application context: every client and
/// component is built once here and handed down, nothing hangs off
/// module-level state. Lives for the process lifetime.
pub struct AppContext {
    pub config: GocartConfig,
    pub firestore: Option<Arc<FirestoreDb>>,
    pub cart: Arc<CartStore>,
    pub catalog: Arc<dyn CatalogStore>,
    pub orders: Arc<dyn OrderStore>,
    pub identity: Arc<IdentitySession>,
    pub reconciler: Arc<CartReconciler>,
    pub order_builder: Arc<OrderBuilder>,
    pub order_history: Arc<OrderHistory>,
}

impl AppContext {
    pub async fn init(config: GocartConfig) -> Result<Self, Error> {
        let firestore = match &config.firestore {
            Some(fs_config) => Some(Arc::new(fs_config.connect().await?)),
            None => {
                info!("Firestore not configured, using local stores");
                None
            }
        };

        let (catalog, orders): (Arc<dyn CatalogStore>, Arc<dyn OrderStore>) = match &firestore {
            Some(db) => (
                Arc::new(FirestoreCatalog::new(
                    db.clone(),
                    config.collections.products.clone(),
                )),
                Arc::new(FirestoreOrders::new(
                    db.clone(),
                    config.collections.orders.clone(),
                )),
            ),
            None => (Arc::new(LocalCatalog::new()), Arc::new(LocalOrders::new())),
        };

        let kv: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::new(config.cart.storage_path.clone()));
        let cart = Arc::new(CartStore::new(kv, config.cart.storage_key.clone()));

        let reconciler = Arc::new(CartReconciler::new(cart.clone(), catalog.clone()));
        let order_builder = Arc::new(OrderBuilder::new(orders.clone(), cart.clone()));
        let order_history = Arc::new(OrderHistory::new(orders.clone(), catalog.clone()));

        Ok(Self {
            config,
            firestore,
            cart,
            catalog,
            orders,
            identity: Arc::new(IdentitySession::new()),
            reconciler,
            order_builder,
            order_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::CartConfig;

    #[tokio::test]
    async fn test_init_without_firestore_uses_local_stores() {
        let dir = tempfile::tempdir().unwrap();
        let config = GocartConfig {
            cart: CartConfig {
                storage_path: dir.path().join("store.json"),
                ..CartConfig::default()
            },
            ..GocartConfig::default()
        };

        let ctx = AppContext::init(config).await.unwrap();
        assert!(ctx.firestore.is_none());

        // The wired components work end to end against the local stores.
        ctx.cart.add("p1").await.unwrap();
        let view = ctx.reconciler.refresh().await.unwrap();
        assert!(view.is_empty()); // p1 not in the (empty) catalog
        assert_eq!(ctx.cart.get().await.unwrap(), vec!["p1"]);
    }
}

use crate::core::models::order::Order;
use crate::core::orders::store::OrderStore;
use anyhow::Error;
use async_trait::async_trait;
use firestore::FirestoreDb;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Orders backed by a Firestore collection, one document per order.
pub struct FirestoreOrders {
    db: Arc<FirestoreDb>,
    collection: String,
}

impl FirestoreOrders {
    pub fn new(db: Arc<FirestoreDb>, collection: impl Into<String>) -> Self {
        Self {
            db,
            collection: collection.into(),
        }
    }
}

#[async_trait]
impl OrderStore for FirestoreOrders {
    async fn put(&self, order: &Order) -> Result<(), Error> {
        self.db
            .fluent()
            .insert()
            .into(self.collection.as_str())
            .document_id(&order.order_id)
            .object(order)
            .execute::<()>()
            .await
            .map_err(|e| {
                error!(
                    "Firestore write failed for order {} in {}: {}",
                    order.order_id, self.collection, e
                );
                e
            })?;

        debug!("Stored order {} in {}", order.order_id, self.collection);
        Ok(())
    }

    async fn list_by_email(&self, email: &str) -> Result<Vec<Order>, Error> {
        let docs = self
            .db
            .fluent()
            .select()
            .from(self.collection.as_str())
            .filter(|q| q.for_all([q.field("email").eq(email)]))
            .query()
            .await
            .map_err(|e| {
                error!(
                    "Firestore order query failed for collection {}: {}",
                    self.collection, e
                );
                e
            })?;

        let mut orders = Vec::with_capacity(docs.len());

        for doc in docs {
            match FirestoreDb::deserialize_doc_to::<Order>(&doc) {
                Ok(order) => orders.push(order),
                Err(err) => {
                    warn!("Failed to deserialize order document {}: {}", doc.name, err);
                }
            }
        }

        Ok(orders)
    }
}

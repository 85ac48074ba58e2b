use crate::core::models::order::Order;
use crate::core::orders::store::OrderStore;
use anyhow::{Error, bail};
use async_trait::async_trait;
use moka::sync::{Cache, CacheBuilder};

/// Local order store for development and tests. Enforces the same
/// create-once semantics as the remote backend.
pub struct LocalOrders {
    orders: Cache<String, Order>,
}

impl LocalOrders {
    pub fn new() -> Self {
        Self {
            orders: CacheBuilder::default().build(),
        }
    }
}

impl Default for LocalOrders {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for LocalOrders {
    async fn put(&self, order: &Order) -> Result<(), Error> {
        if self.orders.contains_key(&order.order_id) {
            bail!("order {} already exists", order.order_id);
        }

        self.orders.insert(order.order_id.clone(), order.clone());
        Ok(())
    }

    async fn list_by_email(&self, email: &str) -> Result<Vec<Order>, Error> {
        Ok(self
            .orders
            .iter()
            .map(|(_, order)| order)
            .filter(|order| order.email == email)
            .collect())
    }
}

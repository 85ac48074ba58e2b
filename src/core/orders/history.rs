use crate::core::catalog::CatalogStore;
use crate::core::identity::Identity;
use crate::core::models::view::{CartLine, OrderView};
use crate::core::orders::store::OrderStore;
use anyhow::Error;
use std::sync::Arc;
use tracing::debug;

/// Reads back a user's placed orders, re-resolving each line against
/// the live catalog the same way the cart view does.
pub struct OrderHistory {
    orders: Arc<dyn OrderStore>,
    catalog: Arc<dyn CatalogStore>,
}

impl OrderHistory {
    pub fn new(orders: Arc<dyn OrderStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self { orders, catalog }
    }

    /// All orders for the identity, each joined with live product
    /// detail. Lines whose product no longer resolves are omitted
    /// from the view; the stored order itself is never rewritten.
    /// Ordering is whatever the backend query returns.
    pub async fn list_orders(&self, identity: &Identity) -> Result<Vec<OrderView>, Error> {
        let orders = self.orders.list_by_email(&identity.email).await?;
        let mut views = Vec::with_capacity(orders.len());

        for order in orders {
            let mut lines = Vec::with_capacity(order.products.len());

            for item in &order.products {
                match self.catalog.get(&item.product_id).await? {
                    Some(product) => lines.push(CartLine {
                        product,
                        quantity: item.quantity,
                    }),
                    None => {
                        debug!(
                            "Dropping unresolvable line {} from order {}",
                            item.product_id, order.order_id
                        );
                    }
                }
            }

            views.push(OrderView { order, lines });
        }

        Ok(views)
    }
}

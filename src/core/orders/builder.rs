use crate::core::cart::CartStore;
use crate::core::identity::Identity;
use crate::core::models::order::{Order, OrderLine};
use crate::core::models::view::CartLine;
use crate::core::orders::store::OrderStore;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum OrderError {
    /// No established identity at checkout; the operation aborts
    /// before anything is written.
    #[error("user is not signed in")]
    NotAuthenticated,

    /// Checkout with an empty view is rejected outright.
    #[error("cart is empty")]
    EmptyCart,

    /// The order document could not be stored. Nothing was placed
    /// and the cart is untouched; the caller reports and may retry
    /// by hand.
    #[error("order could not be stored")]
    Remote(#[source] anyhow::Error),
}

/// Converts a reconciled cart view into a durable order document.
pub struct OrderBuilder {
    orders: Arc<dyn OrderStore>,
    cart: Arc<CartStore>,
}

impl OrderBuilder {
    pub fn new(orders: Arc<dyn OrderStore>, cart: Arc<CartStore>) -> Self {
        Self { orders, cart }
    }

    /// Places an order for the given view under the given identity
    /// and returns the fresh order id.
    ///
    /// The remote write and the local cart clear are two separate
    /// operations with no transactional coupling. Once the write
    /// succeeds the order is placed; a cart-clear failure after that
    /// point is logged and swallowed rather than un-placing it.
    pub async fn place_order(
        &self,
        view: &[CartLine],
        identity: Option<&Identity>,
    ) -> Result<String, OrderError> {
        let identity = identity.ok_or(OrderError::NotAuthenticated)?;

        if view.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let order = Order {
            order_id: Uuid::new_v4().to_string(),
            email: identity.email.clone(),
            date: Utc::now().to_rfc3339(),
            products: view
                .iter()
                .map(|line| OrderLine {
                    product_id: line.product.id.clone(),
                    quantity: line.quantity,
                })
                .collect(),
        };

        self.orders.put(&order).await.map_err(OrderError::Remote)?;

        info!(
            "Placed order {} with {} lines for {}",
            order.order_id,
            order.products.len(),
            order.email
        );

        if let Err(e) = self.cart.clear().await {
            // The order is already durable; losing the clear leaves a
            // cart that re-lists bought items until the user cleans it.
            error!(
                "Cart clear failed after placing order {}: {}",
                order.order_id, e
            );
        }

        Ok(order.order_id)
    }
}

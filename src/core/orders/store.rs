use crate::core::models::order::Order;
use anyhow::Error;
use async_trait::async_trait;

/// Order persistence backend. Orders are create-once documents keyed
/// by their own order id; there is no update or delete path.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn put(&self, order: &Order) -> Result<(), Error>;

    /// All orders placed by the given email, in whatever order the
    /// backend returns them.
    async fn list_by_email(&self, email: &str) -> Result<Vec<Order>, Error>;
}

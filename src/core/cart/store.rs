use crate::core::kv::KeyValueStore;
use crate::core::models::product::ProductId;
use anyhow::Error;
use std::sync::Arc;
use tracing::warn;

/// Storage key the cart identifier sequence is persisted under.
pub const CART_KEY: &str = "cartItems";

/// Outcome of an add. A duplicate add is a distinct user-facing
/// signal, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyInCart,
}

/// Durable set of carted product ids, persisted as a JSON sequence
/// under a single well-known key. Order-insensitive set semantics,
/// but insertion order is preserved for display.
pub struct CartStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl CartStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Reads the persisted id sequence. Nothing persisted or an
    /// unparseable payload both read as empty; a parse failure is
    /// logged, never surfaced.
    pub async fn get(&self) -> Result<Vec<ProductId>, Error> {
        let raw = match self.store.get_item(&self.key).await? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str(&raw) {
            Ok(ids) => Ok(ids),
            Err(e) => {
                warn!("Discarding unparseable cart payload under {}: {}", self.key, e);
                Ok(Vec::new())
            }
        }
    }

    /// Appends `id` unless already present, persisting before return.
    pub async fn add(&self, id: &str) -> Result<AddOutcome, Error> {
        let mut ids = self.get().await?;

        if ids.iter().any(|existing| existing == id) {
            return Ok(AddOutcome::AlreadyInCart);
        }

        ids.push(id.to_string());
        self.persist(&ids).await?;

        Ok(AddOutcome::Added)
    }

    /// Removes `id` if present; removing an absent id is a no-op.
    pub async fn remove(&self, id: &str) -> Result<(), Error> {
        let mut ids = self.get().await?;
        let before = ids.len();

        ids.retain(|existing| existing != id);

        if ids.len() != before {
            self.persist(&ids).await?;
        }

        Ok(())
    }

    /// Persists the empty sequence.
    pub async fn clear(&self) -> Result<(), Error> {
        self.persist(&[]).await
    }

    async fn persist(&self, ids: &[ProductId]) -> Result<(), Error> {
        let raw = serde_json::to_string(ids)?;
        self.store.set_item(&self.key, raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kv::MemoryStore;

    fn store() -> CartStore {
        CartStore::new(Arc::new(MemoryStore::new()), CART_KEY)
    }

    #[tokio::test]
    async fn test_empty_store_reads_empty() {
        let cart = store();
        assert!(cart.get().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_remove_replay_matches_set_semantics() {
        let cart = store();

        cart.add("p1").await.unwrap();
        cart.add("p2").await.unwrap();
        cart.add("p1").await.unwrap();
        cart.remove("p2").await.unwrap();
        cart.add("p3").await.unwrap();
        cart.remove("missing").await.unwrap();

        assert_eq!(cart.get().await.unwrap(), vec!["p1", "p3"]);
    }

    #[tokio::test]
    async fn test_duplicate_add_reports_already_in_cart() {
        let cart = store();

        assert_eq!(cart.add("p1").await.unwrap(), AddOutcome::Added);
        assert_eq!(cart.add("p1").await.unwrap(), AddOutcome::AlreadyInCart);
        assert_eq!(cart.get().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let cart = store();

        cart.add("p1").await.unwrap();
        cart.remove("p2").await.unwrap();

        assert_eq!(cart.get().await.unwrap(), vec!["p1"]);
    }

    #[tokio::test]
    async fn test_clear_persists_empty_sequence() {
        let kv = Arc::new(MemoryStore::new());
        let cart = CartStore::new(kv.clone(), CART_KEY);

        cart.add("p1").await.unwrap();
        cart.clear().await.unwrap();

        assert!(cart.get().await.unwrap().is_empty());
        // The empty sequence is written out, not just absent.
        assert_eq!(
            kv.get_item(CART_KEY).await.unwrap(),
            Some("[]".to_string())
        );
    }

    #[tokio::test]
    async fn test_garbage_payload_fails_open() {
        let kv = Arc::new(MemoryStore::new());
        kv.set_item(CART_KEY, "not json".to_string()).await.unwrap();

        let cart = CartStore::new(kv, CART_KEY);
        assert!(cart.get().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insertion_order_preserved() {
        let cart = store();

        cart.add("p3").await.unwrap();
        cart.add("p1").await.unwrap();
        cart.add("p2").await.unwrap();

        assert_eq!(cart.get().await.unwrap(), vec!["p3", "p1", "p2"]);
    }
}

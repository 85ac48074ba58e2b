use anyhow::Error;
use async_trait::async_trait;

/// Durable key-value persistence primitive, the seam over whatever
/// the host platform provides for small local state. Writes are
/// readable immediately after completion within the same process.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, Error>;

    async fn set_item(&self, key: &str, value: String) -> Result<(), Error>;
}

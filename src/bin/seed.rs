use anyhow::{Context, anyhow};
use gocart::app::config::GocartConfig;
use gocart::core::catalog::seed::seed_products;
use gocart::core::models::product::Product;
use gocart::core::observability;
use std::path::PathBuf;
use tracing::info;

/// Uploads a JSON product list into the configured catalog
/// collection. Usage: `seed <products.json> [config.yaml]`.
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let mut args = std::env::args().skip(1);

    let products_path = PathBuf::from(
        args.next()
            .ok_or_else(|| anyhow!("usage: seed <products.json> [config.yaml]"))?,
    );
    let config_path = PathBuf::from(args.next().unwrap_or_else(|| "gocart.yaml".to_string()));

    let config = GocartConfig::load(&config_path)?;
    observability::init(&config.logging)?;

    let fs_config = config
        .firestore
        .as_ref()
        .ok_or_else(|| anyhow!("firestore must be configured to seed the catalog"))?;
    let db = fs_config.connect().await?;

    let raw = tokio::fs::read_to_string(&products_path)
        .await
        .with_context(|| format!("failed to read {}", products_path.display()))?;
    let products: Vec<Product> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a product list", products_path.display()))?;

    let count = seed_products(&db, &config.collections.products, &products).await?;
    info!("Seeded {} products into {}", count, config.collections.products);

    Ok(())
}

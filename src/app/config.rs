use anyhow::Error;
use config::Config;
use firestore::{FirestoreDb, FirestoreDbOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub database_id: Option<String>,
    /// Emulator host:port; when set the client talks to the local
    /// emulator instead of the live project.
    pub emulator_host: Option<String>,
    pub credentials_path: Option<PathBuf>,
}

impl FirestoreConfig {
    /// Connects a Firestore client for this project. Credentials come
    /// from the configured service account key file when present,
    /// otherwise from the ambient environment.
    pub async fn connect(&self) -> Result<FirestoreDb, Error> {
        info!("Connecting to Firestore project {}", self.project_id);

        let mut options = FirestoreDbOptions::new(self.project_id.clone());

        if let Some(db_id) = &self.database_id {
            options = options.with_database_id(db_id.clone());
        }

        if let Some(host) = &self.emulator_host {
            options = options.with_firebase_api_url(format!("http://{}", host));
        }

        let db = if let Some(path) = &self.credentials_path {
            FirestoreDb::with_options_service_account_key_file(options, path.clone()).await?
        } else {
            FirestoreDb::with_options(options).await?
        };

        info!("Connected to Firestore");
        Ok(db)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    /// Backing file of the local key-value store.
    #[serde(default = "default_cart_path")]
    pub storage_path: PathBuf,
    /// Key the cart id sequence is persisted under.
    #[serde(default = "default_cart_key")]
    pub storage_key: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_path: default_cart_path(),
            storage_key: default_cart_key(),
        }
    }
}

fn default_cart_path() -> PathBuf {
    PathBuf::from("gocart_store.json")
}

fn default_cart_key() -> String {
    crate::core::cart::CART_KEY.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionsConfig {
    #[serde(default = "default_products_collection")]
    pub products: String,
    #[serde(default = "default_orders_collection")]
    pub orders: String,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            products: default_products_collection(),
            orders: default_orders_collection(),
        }
    }
}

fn default_products_collection() -> String {
    "products".to_string()
}

fn default_orders_collection() -> String {
    "orders".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRotation {
    Daily,
    Hourly,
    Never,
}

impl Default for FileRotation {
    fn default() -> Self {
        FileRotation::Daily
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSink {
    #[serde(flatten)]
    pub dest: LogType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LogType {
    Stdout {
        #[serde(default = "default_logtype_color")]
        color: bool,
        #[serde(default)]
        json: bool,
        #[serde(default = "default_true")]
        spans: bool,
    },
    File {
        path: PathBuf,
        #[serde(default)]
        json: bool,
        #[serde(default)]
        rotation: FileRotation,
        #[serde(default)]
        max_files: usize,
        #[serde(default = "default_true")]
        spans: bool,
    },
}

fn default_logtype_color() -> bool {
    true
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub sinks: Vec<LogSink>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            sinks: vec![LogSink {
                dest: LogType::Stdout {
                    color: true,
                    json: false,
                    spans: true,
                },
            }],
        }
    }
}

impl LoggingConfig {
    /// Validates the logging configuration
    pub fn validate(&self) -> Result<(), Error> {
        if self.sinks.is_empty() {
            anyhow::bail!("At least one logging sink must be configured");
        }

        self.level.parse::<tracing::Level>().map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: trace, debug, info, warn, error",
                self.level
            )
        })?;

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GocartConfig {
    /// Remote backend. When absent the app runs against the local
    /// in-memory stores, for development.
    pub firestore: Option<FirestoreConfig>,
    #[serde(default)]
    pub cart: CartConfig,
    #[serde(default)]
    pub collections: CollectionsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GocartConfig {
    pub fn load(path: &PathBuf) -> Result<GocartConfig, Error> {
        let cfg = Config::builder()
            .add_source(config::File::from(path.to_path_buf()))
            .build()?;

        Ok(cfg.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(yaml: &str) -> GocartConfig {
        Config::builder()
            .add_source(config::File::from_str(yaml, FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_minimal_config_gets_defaults() {
        let cfg = parse("{}");

        assert!(cfg.firestore.is_none());
        assert_eq!(cfg.collections.products, "products");
        assert_eq!(cfg.collections.orders, "orders");
        assert_eq!(cfg.cart.storage_key, "cartItems");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.sinks.len(), 1);
    }

    #[test]
    fn test_firestore_section_parses() {
        let cfg = parse("firestore:\n  project_id: gokart-19d22\n  emulator_host: localhost:8080\n");

        let fs = cfg.firestore.unwrap();
        assert_eq!(fs.project_id, "gokart-19d22");
        assert_eq!(fs.emulator_host.as_deref(), Some("localhost:8080"));
        assert!(fs.credentials_path.is_none());
    }

    #[test]
    fn test_logging_validate_rejects_bad_level() {
        let config = LoggingConfig {
            level: "noisy".to_string(),
            ..LoggingConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_validate_rejects_no_sinks() {
        let config = LoggingConfig {
            level: "info".to_string(),
            sinks: Vec::new(),
        };

        assert!(config.validate().is_err());
    }
}

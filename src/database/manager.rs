use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::{AppConfig, ConfigError, StoreBackend};

use super::memory::MemoryFoodStore;
use super::mongo::MongoFoodStore;
use super::repository::FoodStore;

/// Errors from the listing store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Document encoding error: {0}")]
    Encoding(#[from] mongodb::bson::ser::Error),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

/// Builds the configured store and checks it is reachable
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn connect(config: &AppConfig) -> Result<Arc<dyn FoodStore>, DatabaseError> {
        let store: Arc<dyn FoodStore> = match config.store.backend {
            StoreBackend::Mongo => Arc::new(MongoFoodStore::connect(&config.database).await?),
            StoreBackend::Memory => Arc::new(MemoryFoodStore::new()),
        };

        store.ping().await?;
        info!("Listing store ready ({:?})", config.store.backend);
        Ok(store)
    }
}

//! Saved connection config service
//!
//! Remembers the last connection config under a single key so the login
//! form can be pre-filled on the next start.

use crate::config::SAVED_CONFIG_KEY;
use crate::database::ConnectionConfig;
use crate::error::{AppError, Result};
use crate::storage::KeyValueStore;

/// Service for remembering connection settings
#[derive(Clone)]
pub struct SavedConfigService<S> {
    store: S,
}

impl<S: KeyValueStore> SavedConfigService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the remembered config, if there is one.
    ///
    /// An unreadable entry is treated as absent so a bad file never blocks
    /// the login form.
    pub async fn load(&self) -> Result<Option<ConnectionConfig>> {
        let Some(content) = self.store.get(SAVED_CONFIG_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable saved config: {}", e);
                Ok(None)
            }
        }
    }

    /// Save the config
    pub async fn save(&self, config: &ConnectionConfig) -> Result<()> {
        let content = serde_json::to_string(config)
            .map_err(|e| AppError::Storage(format!("Failed to serialize config: {}", e)))?;

        self.store.set(SAVED_CONFIG_KEY, &content).await?;
        tracing::info!("Connection config remembered for {}", config.host);

        Ok(())
    }

    /// Forget the config
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(SAVED_CONFIG_KEY).await?;
        tracing::info!("Remembered connection config cleared");
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

//! Simulated database connection
//!
//! Owns the connection status and the record store for the current session.
//! Every operation waits out an artificial delay before touching the store;
//! no real I/O is performed.
//!
//! State machine: `Disconnected -> Connecting -> Connected -> Disconnected`.

use super::models::{ConnectionConfig, ConnectionStatus, Record, RecordPatch};
use super::store::RecordStore;
use crate::config::{CONNECT_DELAY_MS, OPERATION_DELAY_MS};
use crate::error::{AppError, Result};
use crate::ui::{ActivityLog, LogLevel};
use std::time::Duration;

/// Artificial delays standing in for network round-trips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub connect: Duration,
    pub operation: Duration,
}

impl Latency {
    /// No delay at all, for deterministic tests
    pub fn none() -> Self {
        Self {
            connect: Duration::ZERO,
            operation: Duration::ZERO,
        }
    }

    async fn pause(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            connect: Duration::from_millis(CONNECT_DELAY_MS),
            operation: Duration::from_millis(OPERATION_DELAY_MS),
        }
    }
}

/// The single simulated connection of an application session
#[derive(Debug)]
pub struct Connection {
    status: ConnectionStatus,
    config: Option<ConnectionConfig>,
    store: Option<RecordStore>,
    latency: Latency,
}

impl Connection {
    pub fn new(latency: Latency) -> Self {
        Self {
            status: ConnectionStatus::Disconnected,
            config: None,
            store: None,
            latency,
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    /// Config of the live connection, if any
    pub fn config(&self) -> Option<&ConnectionConfig> {
        self.config.as_ref()
    }

    /// Open a connection with a fresh, empty record store
    pub async fn connect(
        &mut self,
        config: ConnectionConfig,
        log: &mut impl ActivityLog,
    ) -> Result<()> {
        if self.status != ConnectionStatus::Disconnected {
            return Err(AppError::InvalidState {
                action: "connect",
                status: self.status,
            });
        }

        self.status = ConnectionStatus::Connecting;
        log.append_log("Connecting to database...", LogLevel::Info);
        tracing::info!(
            "Connecting to {}:{}/{} as {:?}",
            config.host,
            config.port,
            config.database,
            config.user
        );

        if let Err(e) = validate_config(&config) {
            self.status = ConnectionStatus::Disconnected;
            tracing::warn!("Connect rejected: {}", e);
            return Err(e);
        }

        Latency::pause(self.latency.connect).await;

        self.config = Some(config);
        self.store = Some(RecordStore::new());
        self.status = ConnectionStatus::Connected;
        log.append_log("[DEMO] Connection established successfully!", LogLevel::Info);
        tracing::info!("Connection established");

        Ok(())
    }

    /// Drop the connection and every record it held. Safe to call repeatedly.
    pub fn disconnect(&mut self, log: &mut impl ActivityLog) {
        if self.store.take().is_some() {
            tracing::info!("Connection closed, records discarded");
        }
        self.config = None;
        self.status = ConnectionStatus::Disconnected;
        log.append_log("Disconnected from database", LogLevel::Info);
    }

    pub async fn insert(&mut self, record: Record) -> Result<Record> {
        let delay = self.latency.operation;
        self.ensure_connected()?;
        Latency::pause(delay).await;
        self.store_mut()?.insert(record)
    }

    pub async fn update(&mut self, phone: &str, patch: RecordPatch) -> Result<Record> {
        let delay = self.latency.operation;
        self.ensure_connected()?;
        Latency::pause(delay).await;
        self.store_mut()?.update(phone, patch)
    }

    pub async fn delete(&mut self, phone: &str) -> Result<usize> {
        let delay = self.latency.operation;
        self.ensure_connected()?;
        Latency::pause(delay).await;
        Ok(self.store_mut()?.delete(phone))
    }

    pub async fn list_all(&mut self) -> Result<Vec<Record>> {
        let delay = self.latency.operation;
        self.ensure_connected()?;
        Latency::pause(delay).await;
        Ok(self.store_mut()?.list_all())
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(AppError::NoActiveConnection)
        }
    }

    fn store_mut(&mut self) -> Result<&mut RecordStore> {
        self.store.as_mut().ok_or(AppError::NoActiveConnection)
    }
}

fn validate_config(config: &ConnectionConfig) -> Result<()> {
    if config.host.trim().is_empty() {
        return Err(AppError::ConnectionRejected("host is required".to_string()));
    }
    if config.port == 0 {
        return Err(AppError::ConnectionRejected("port must be greater than 0".to_string()));
    }
    if config.database.trim().is_empty() {
        return Err(AppError::ConnectionRejected(
            "database name is required".to_string(),
        ));
    }
    Ok(())
}

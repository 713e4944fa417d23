//! Database models
//!
//! Plain data types shared by the store, the connection and the UI.
//! All models use serde so they can be persisted or handed to a view.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A contact-like record keyed by phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub full_name: String,
    /// Lookup key, unique within a store
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Record {
    pub fn new(full_name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            phone: phone.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Overlay the fields present in `patch`, leaving the rest untouched
    pub fn apply(&mut self, patch: RecordPatch) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(note) = patch.note {
            self.note = Some(note);
        }
    }
}

/// Partial update for a record. The phone key itself is never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    pub full_name: Option<String>,
    pub note: Option<String>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.note.is_none()
    }
}

/// Lifecycle state of the simulated connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
        };
        f.write_str(s)
    }
}

/// Connection parameters entered on the login form.
///
/// Serialized with the field names the saved config has always used,
/// so `remember_me` is written as `rememberMe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub database: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: crate::config::DEFAULT_HOST.to_string(),
            port: crate::config::DEFAULT_PORT,
            user: String::new(),
            password: String::new(),
            database: String::new(),
            remember_me: false,
        }
    }
}

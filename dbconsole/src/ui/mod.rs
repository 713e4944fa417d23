//! UI adapter
//!
//! The controller never touches a view directly. It talks to a [`Ui`]
//! implementation that reads form fields, switches panels, renders the
//! record list and appends to the log panel.

pub mod markup;

pub use markup::MarkupUi;

use crate::config::{MAX_FULL_NAME_LENGTH, MAX_NOTE_LENGTH, MAX_PHONE_LENGTH};
use crate::database::{ConnectionConfig, Record, RecordPatch};
use crate::error::{AppError, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Severity of a log panel entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Error,
}

/// One line of the log panel
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, level: LogLevel) -> Self {
        Self {
            timestamp: Local::now(),
            message: message.into(),
            level,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

/// The record operations offered by the operation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Insert,
    Edit,
    Delete,
    ShowAll,
}

impl OperationKind {
    /// ShowAll reads and renders straight away instead of opening a form
    pub fn has_panel(self) -> bool {
        self != OperationKind::ShowAll
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Insert => "insert",
            OperationKind::Edit => "edit",
            OperationKind::Delete => "delete",
            OperationKind::ShowAll => "showAll",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = AppError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "insert" => Ok(OperationKind::Insert),
            "edit" => Ok(OperationKind::Edit),
            "delete" => Ok(OperationKind::Delete),
            "showAll" | "show-all" => Ok(OperationKind::ShowAll),
            other => Err(AppError::Validation(format!("Unknown operation: {}", other))),
        }
    }
}

/// Raw field values of an operation form, as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    pub full_name: String,
    pub phone: String,
    pub note: String,
}

impl RecordForm {
    pub fn new(full_name: &str, phone: &str, note: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            note: note.to_string(),
        }
    }

    /// Phone is the only field delete needs
    pub fn phone_only(phone: &str) -> Self {
        Self {
            phone: phone.to_string(),
            ..Self::default()
        }
    }

    /// Build a new record; name and phone are required, an empty note is absent
    pub fn to_record(&self) -> Result<Record> {
        let full_name = required("Full name", &self.full_name, MAX_FULL_NAME_LENGTH)?;
        let phone = self.key()?;
        let note = optional("Note", &self.note, MAX_NOTE_LENGTH)?;

        Ok(Record {
            full_name,
            phone,
            note,
        })
    }

    /// Build a patch from whichever of name and note were filled in
    pub fn to_patch(&self) -> Result<RecordPatch> {
        let patch = RecordPatch {
            full_name: optional("Full name", &self.full_name, MAX_FULL_NAME_LENGTH)?,
            note: optional("Note", &self.note, MAX_NOTE_LENGTH)?,
        };

        if patch.is_empty() {
            return Err(AppError::Validation(
                "Enter a new full name or note to edit".to_string(),
            ));
        }
        Ok(patch)
    }

    /// The phone key, trimmed and required
    pub fn key(&self) -> Result<String> {
        required("Phone", &self.phone, MAX_PHONE_LENGTH)
    }
}

fn required(field: &str, value: &str, max: usize) -> Result<String> {
    optional(field, value, max)?
        .ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

fn optional(field: &str, value: &str, max: usize) -> Result<Option<String>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(Some(value.to_string()))
}

/// Raw field values of the login form, as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub remember_me: bool,
}

impl LoginForm {
    /// Prefill from a saved config. The password is never restored.
    pub fn restored(config: &ConnectionConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port.to_string(),
            user: config.user.clone(),
            password: String::new(),
            database: config.database.clone(),
            remember_me: config.remember_me,
        }
    }

    pub fn to_config(&self) -> Result<ConnectionConfig> {
        let port = self.port.trim().parse::<u16>().map_err(|_| {
            AppError::ConnectionRejected(format!("invalid port: {:?}", self.port))
        })?;

        Ok(ConnectionConfig {
            host: self.host.trim().to_string(),
            port,
            user: self.user.trim().to_string(),
            password: self.password.clone(),
            database: self.database.trim().to_string(),
            remember_me: self.remember_me,
        })
    }
}

/// Sink for log panel entries
pub trait ActivityLog {
    fn append_log(&mut self, message: &str, level: LogLevel);
}

/// Everything the controller needs from a view
pub trait Ui: ActivityLog {
    fn read_login_form(&self) -> LoginForm;

    fn fill_login_form(&mut self, form: LoginForm);

    fn read_record_form(&self, kind: OperationKind) -> RecordForm;

    fn clear_record_form(&mut self, kind: OperationKind);

    /// Hide every operation panel, then show `kind` if it has one
    fn show_operation_panel(&mut self, kind: Option<OperationKind>);

    /// Replace the records display with one card per record
    fn render_records(&mut self, records: &[Record]);

    /// Show the main area when connected, the login form otherwise
    fn toggle_auth_area(&mut self, is_connected: bool);
}

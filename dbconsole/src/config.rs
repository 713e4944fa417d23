//! Application configuration constants
//!
//! Central location for latencies, storage keys and input limits
//! used throughout the application.

// ===== Simulated Latency =====

/// Delay before a connect attempt completes, in milliseconds
pub const CONNECT_DELAY_MS: u64 = 1_000;

/// Delay before each record operation reaches the store, in milliseconds
pub const OPERATION_DELAY_MS: u64 = 300;

// ===== Persistence =====

/// Key under which the remembered connection config is stored
pub const SAVED_CONFIG_KEY: &str = "dbConfig";

/// File name of the key-value store inside the data directory
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "DBCONSOLE_DATA_DIR";

/// Directory name used under the platform data directory
pub const APP_DIR_NAME: &str = "dbconsole";

// ===== Login Form Defaults =====

/// Host pre-filled when nothing was remembered
pub const DEFAULT_HOST: &str = "localhost";

/// Port pre-filled when nothing was remembered
pub const DEFAULT_PORT: u16 = 5432;

// ===== Record Limits =====

/// Maximum length of a record's full name, in characters
pub const MAX_FULL_NAME_LENGTH: usize = 100;

/// Maximum length of a phone number, in characters
pub const MAX_PHONE_LENGTH: usize = 32;

/// Maximum length of a note, in characters
pub const MAX_NOTE_LENGTH: usize = 500;

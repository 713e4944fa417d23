//! Database module
//!
//! The simulated back end:
//! - Model definitions
//! - In-memory record store
//! - Connection state machine with artificial latency

pub mod connection;
pub mod models;
pub mod store;

pub use connection::{Connection, Latency};
pub use models::*;
pub use store::RecordStore;

//! Services module
//!
//! Business logic services that sit between the controller and storage.

pub mod saved_config;

pub use saved_config::SavedConfigService;

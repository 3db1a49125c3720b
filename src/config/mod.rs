//! Configuration module for storekeep
//!
//! - Path resolution for the data directory, stores and backups
//! - Persisted user settings

pub mod paths;
pub mod settings;

pub use paths::StorekeepPaths;
pub use settings::Settings;

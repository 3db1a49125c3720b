//! storekeep - Terminal-based record keeper for a small business
//!
//! This library provides the core of the storekeep application: fixed-size
//! record stores for inventory items, customers, orders and users, the
//! services that keep them consistent, and financial reports built from them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (items, customers, orders, users)
//! - `storage`: Fixed-size binary record stores
//! - `services`: Business logic layer
//! - `reports`: Sales, profit and inventory value reports
//! - `audit`: Audit logging system
//! - `backup`: Backup and restore of the store files
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use storekeep::config::{paths::StorekeepPaths, settings::Settings};
//! use storekeep::storage::Storage;
//!
//! let paths = StorekeepPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::from_settings(paths, &settings)?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{StorekeepError, StorekeepResult};

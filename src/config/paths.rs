//! Path management for storekeep
//!
//! ## Path Resolution Order
//!
//! 1. `STOREKEEP_DATA_DIR` environment variable (if set)
//! 2. The platform config directory joined with `storekeep`
//!    (`~/.config/storekeep` on Linux, `%APPDATA%\storekeep` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::StorekeepError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "STOREKEEP_DATA_DIR";

/// Manages all paths used by storekeep
#[derive(Debug, Clone)]
pub struct StorekeepPaths {
    base_dir: PathBuf,
}

impl StorekeepPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the platform config
    /// directory cannot be determined.
    pub fn new() -> Result<Self, StorekeepError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => BaseDirs::new()
                .map(|dirs| dirs.config_dir().join("storekeep"))
                .ok_or_else(|| {
                    StorekeepError::Config("Could not determine config directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the record stores
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Directory holding timestamped backups
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn inventory_file(&self) -> PathBuf {
        self.data_dir().join("inventory.dat")
    }

    pub fn customers_file(&self) -> PathBuf {
        self.data_dir().join("customers.dat")
    }

    pub fn orders_file(&self) -> PathBuf {
        self.data_dir().join("orders.dat")
    }

    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.dat")
    }

    /// Ensure the base, data and backup directories exist
    pub fn ensure_directories(&self) -> Result<(), StorekeepError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| StorekeepError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| StorekeepError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir()).map_err(|e| {
            StorekeepError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if storekeep has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorekeepPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.backup_dir(), temp_dir.path().join("backups"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var(DATA_DIR_ENV, temp_dir.path());
        let paths = StorekeepPaths::new().unwrap();
        std::env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorekeepPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.backup_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_store_file_names() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorekeepPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.users_file(), temp_dir.path().join("data").join("users.dat"));
        assert_eq!(paths.orders_file(), temp_dir.path().join("data").join("orders.dat"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }
}

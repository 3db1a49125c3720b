//! Restoring the record stores from a backup

use std::fs;
use std::path::Path;

use tracing::info;

use super::STORE_FILES;
use crate::config::paths::StorekeepPaths;
use crate::error::{StorekeepError, StorekeepResult};

/// Check result for one store file inside a backup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCheck {
    pub file: String,
    /// File length in bytes, `None` when the file is absent
    pub size_bytes: Option<u64>,
    pub record_size: usize,
}

impl StoreCheck {
    pub fn is_present(&self) -> bool {
        self.size_bytes.is_some()
    }

    /// Length is a whole number of records
    pub fn is_intact(&self) -> bool {
        self.size_bytes
            .map_or(true, |len| len % self.record_size as u64 == 0)
    }

    pub fn record_count(&self) -> u64 {
        self.size_bytes.unwrap_or(0) / self.record_size as u64
    }
}

/// Result of validating a backup without restoring it
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub stores: Vec<StoreCheck>,
}

impl ValidationResult {
    /// At least one store is present and every present store is intact
    pub fn is_valid(&self) -> bool {
        self.stores.iter().any(StoreCheck::is_present)
            && self.stores.iter().all(StoreCheck::is_intact)
    }

    pub fn problems(&self) -> Vec<String> {
        let mut problems: Vec<String> = self
            .stores
            .iter()
            .filter(|s| !s.is_intact())
            .map(|s| format!("{} is not a whole number of records", s.file))
            .collect();
        if !self.stores.iter().any(StoreCheck::is_present) {
            problems.push("backup holds no store files".to_string());
        }
        problems
    }
}

/// Result of a restore operation
#[derive(Debug, Default)]
pub struct RestoreResult {
    /// Store files copied back, with their record counts
    pub restored: Vec<(String, u64)>,
    /// Store files absent from the backup; the live copies were left alone
    pub skipped: Vec<String>,
}

impl RestoreResult {
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self
            .restored
            .iter()
            .map(|(file, count)| format!("{} ({} records)", file, count))
            .collect();
        if parts.is_empty() {
            parts.push("nothing".to_string());
        }
        let mut summary = format!("Restored {}", parts.join(", "));
        if !self.skipped.is_empty() {
            summary.push_str(&format!("; not in backup: {}", self.skipped.join(", ")));
        }
        summary
    }
}

/// Handles restoring from backups
pub struct RestoreManager {
    paths: StorekeepPaths,
}

impl RestoreManager {
    pub fn new(paths: StorekeepPaths) -> Self {
        Self { paths }
    }

    fn backup_path(&self, name: &str) -> StorekeepResult<std::path::PathBuf> {
        let path = self.paths.backup_dir().join(name);
        if name.contains(|c| c == '/' || c == '\\') || !path.is_dir() {
            return Err(StorekeepError::NotFound {
                entity_type: "Backup",
                identifier: name.to_string(),
            });
        }
        Ok(path)
    }

    /// Inspect a backup without changing anything
    pub fn validate_backup(&self, name: &str) -> StorekeepResult<ValidationResult> {
        let path = self.backup_path(name)?;
        Ok(check_dir(&path))
    }

    /// Replace the live stores with the copies in backup `name`
    ///
    /// Each file is copied to a temp file beside the live store and renamed
    /// into place. Stores missing from the backup are left as they are.
    pub fn restore(&self, name: &str) -> StorekeepResult<RestoreResult> {
        let path = self.backup_path(name)?;
        let validation = check_dir(&path);
        if !validation.is_valid() {
            return Err(StorekeepError::Backup(format!(
                "Backup {} is damaged: {}",
                name,
                validation.problems().join("; ")
            )));
        }

        self.paths.ensure_directories()?;
        let data_dir = self.paths.data_dir();
        let mut result = RestoreResult::default();

        for check in validation.stores {
            if !check.is_present() {
                result.skipped.push(check.file);
                continue;
            }

            let live = data_dir.join(&check.file);
            let temp = data_dir.join(format!("{}.restore", check.file));
            fs::copy(path.join(&check.file), &temp).map_err(|e| {
                StorekeepError::Backup(format!("Failed to copy {}: {}", check.file, e))
            })?;
            fs::rename(&temp, &live).map_err(|e| {
                let _ = fs::remove_file(&temp);
                StorekeepError::Backup(format!("Failed to replace {}: {}", check.file, e))
            })?;

            let count = check.record_count();
            result.restored.push((check.file, count));
        }

        info!(backup = %name, restored = result.restored.len(), "Restored backup");
        Ok(result)
    }
}

fn check_dir(path: &Path) -> ValidationResult {
    let stores = STORE_FILES
        .iter()
        .map(|(file, record_size)| StoreCheck {
            file: file.to_string(),
            size_bytes: fs::metadata(path.join(file)).ok().map(|m| m.len()),
            record_size: *record_size,
        })
        .collect();
    ValidationResult { stores }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::BackupManager;
    use crate::config::settings::BackupRetention;
    use tempfile::TempDir;

    fn setup() -> (StorekeepPaths, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorekeepPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        (paths, temp_dir)
    }

    #[test]
    fn test_backup_then_restore() {
        let (paths, _temp) = setup();
        fs::write(paths.orders_file(), vec![1u8; 66]).unwrap();
        fs::write(paths.customers_file(), vec![2u8; 374]).unwrap();

        let backup = BackupManager::new(paths.clone(), BackupRetention::default())
            .create_backup()
            .unwrap();

        fs::write(paths.orders_file(), vec![9u8; 33]).unwrap();
        fs::write(paths.inventory_file(), vec![3u8; 274]).unwrap();

        let result = RestoreManager::new(paths.clone()).restore(&backup.name).unwrap();

        assert_eq!(fs::read(paths.orders_file()).unwrap(), vec![1u8; 66]);
        assert!(result.restored.contains(&("orders.dat".to_string(), 2)));
        assert!(result.skipped.contains(&"inventory.dat".to_string()));
        // not in the backup, so untouched
        assert_eq!(fs::read(paths.inventory_file()).unwrap().len(), 274);
        assert!(result.summary().contains("orders.dat (2 records)"));
    }

    #[test]
    fn test_damaged_backup_rejected() {
        let (paths, _temp) = setup();
        let dir = paths.backup_dir().join("20240101_120000");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("users.dat"), vec![0u8; 100]).unwrap();

        let manager = RestoreManager::new(paths.clone());
        let validation = manager.validate_backup("20240101_120000").unwrap();
        assert!(!validation.is_valid());
        assert_eq!(validation.problems().len(), 1);

        let err = manager.restore("20240101_120000").unwrap_err();
        assert!(matches!(err, StorekeepError::Backup(_)));
    }

    #[test]
    fn test_empty_backup_invalid() {
        let (paths, _temp) = setup();
        fs::create_dir(paths.backup_dir().join("20240101_120000")).unwrap();

        let validation = RestoreManager::new(paths)
            .validate_backup("20240101_120000")
            .unwrap();
        assert!(!validation.is_valid());
    }

    #[test]
    fn test_unknown_backup() {
        let (paths, _temp) = setup();
        let manager = RestoreManager::new(paths);

        assert!(manager.restore("19990101_000000").unwrap_err().is_not_found());
        assert!(manager.validate_backup("../data").unwrap_err().is_not_found());
    }
}

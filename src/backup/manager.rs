//! Backup creation, listing and retention

use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use super::STORE_FILES;
use crate::config::paths::StorekeepPaths;
use crate::config::settings::BackupRetention;
use crate::error::{StorekeepError, StorekeepResult};

const NAME_FORMAT: &str = "%Y%m%d_%H%M%S";
const STAMP_LEN: usize = 15;

/// Metadata about one backup directory
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Directory name, e.g. `20240131_093000`
    pub name: String,
    pub path: PathBuf,
    /// Local time the backup was taken
    pub created_at: NaiveDateTime,
    /// Collision counter from a `_N` suffix; 0 when absent
    pub sequence: u32,
    /// Store files present in the backup
    pub files: Vec<String>,
    pub size_bytes: u64,
}

/// Manages backup creation and retention
pub struct BackupManager {
    paths: StorekeepPaths,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: StorekeepPaths, retention: BackupRetention) -> Self {
        Self { paths, retention }
    }

    /// Copy every existing store file into a new timestamped directory
    ///
    /// Stores that do not exist yet are skipped.
    pub fn create_backup(&self) -> StorekeepResult<BackupInfo> {
        self.create_backup_at(Local::now().naive_local())
    }

    fn create_backup_at(&self, now: NaiveDateTime) -> StorekeepResult<BackupInfo> {
        let backup_dir = self.paths.backup_dir();
        fs::create_dir_all(&backup_dir).map_err(|e| {
            StorekeepError::Backup(format!("Failed to create backup directory: {}", e))
        })?;

        let stamp = now.format(NAME_FORMAT).to_string();
        let mut name = stamp.clone();
        let mut sequence = 0;
        while backup_dir.join(&name).exists() {
            sequence += 1;
            name = format!("{}_{}", stamp, sequence);
        }

        let target = backup_dir.join(&name);
        fs::create_dir(&target)
            .map_err(|e| StorekeepError::Backup(format!("Failed to create {}: {}", name, e)))?;

        let data_dir = self.paths.data_dir();
        for (file, _) in STORE_FILES {
            let source = data_dir.join(file);
            if !source.exists() {
                debug!(file, "Store absent, not backed up");
                continue;
            }
            fs::copy(&source, target.join(file)).map_err(|e| {
                StorekeepError::Backup(format!("Failed to copy {}: {}", file, e))
            })?;
        }

        info!(backup = %name, "Created backup");
        self.get_backup(&name)?
            .ok_or_else(|| StorekeepError::Backup(format!("Backup {} vanished", name)))
    }

    /// Create a backup, then prune old ones
    pub fn create_backup_with_retention(&self) -> StorekeepResult<(BackupInfo, Vec<PathBuf>)> {
        let backup = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup, deleted))
    }

    /// All backups, newest first
    pub fn list_backups(&self) -> StorekeepResult<Vec<BackupInfo>> {
        let backup_dir = self.paths.backup_dir();
        if !backup_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&backup_dir).map_err(|e| {
            StorekeepError::Backup(format!("Failed to read backup directory: {}", e))
        })?;

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                StorekeepError::Io(format!("Failed to read directory entry: {}", e))
            })?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(info) = self.get_backup(&name)? {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| (b.created_at, b.sequence).cmp(&(a.created_at, a.sequence)));
        Ok(backups)
    }

    /// Look up a backup by directory name
    ///
    /// Returns `None` for names that are not backup directories.
    pub fn get_backup(&self, name: &str) -> StorekeepResult<Option<BackupInfo>> {
        let Some((created_at, sequence)) = parse_backup_name(name) else {
            return Ok(None);
        };

        let path = self.paths.backup_dir().join(name);
        if !path.is_dir() {
            return Ok(None);
        }

        let mut files = Vec::new();
        let mut size_bytes = 0;
        for (file, _) in STORE_FILES {
            if let Ok(metadata) = fs::metadata(path.join(file)) {
                files.push(file.to_string());
                size_bytes += metadata.len();
            }
        }

        Ok(Some(BackupInfo {
            name: name.to_string(),
            path,
            created_at,
            sequence,
            files,
            size_bytes,
        }))
    }

    /// Delete all but the newest `max_backups` backups
    ///
    /// A limit of zero keeps everything.
    pub fn enforce_retention(&self) -> StorekeepResult<Vec<PathBuf>> {
        if self.retention.max_backups == 0 {
            return Ok(Vec::new());
        }

        let mut deleted = Vec::new();
        for backup in self
            .list_backups()?
            .into_iter()
            .skip(self.retention.max_backups)
        {
            fs::remove_dir_all(&backup.path).map_err(|e| {
                StorekeepError::Backup(format!("Failed to delete old backup {}: {}", backup.name, e))
            })?;
            debug!(backup = %backup.name, "Pruned backup");
            deleted.push(backup.path);
        }

        Ok(deleted)
    }
}

/// Split `YYYYMMDD_HHMMSS[_N]` into its timestamp and sequence
fn parse_backup_name(name: &str) -> Option<(NaiveDateTime, u32)> {
    let stamp = name.get(..STAMP_LEN)?;
    let created_at = NaiveDateTime::parse_from_str(stamp, NAME_FORMAT).ok()?;

    let sequence = match &name[STAMP_LEN..] {
        "" => 0,
        rest => rest.strip_prefix('_')?.parse().ok()?,
    };

    Some((created_at, sequence))
}

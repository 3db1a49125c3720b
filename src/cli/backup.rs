//! Backup CLI commands
//!
//! Administrators only; the caller checks access before dispatching here.

use chrono::Local;
use clap::Subcommand;

use crate::backup::{BackupInfo, BackupManager, RestoreManager};
use crate::config::paths::StorekeepPaths;
use crate::config::settings::Settings;
use crate::error::{StorekeepError, StorekeepResult};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Back up every store file
    Create,

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Replace the stores with a backup
    Restore {
        /// Backup name (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show what a backup contains
    Info {
        /// Backup name (use 'latest' for most recent)
        backup: String,
    },

    /// Delete backups beyond the retention limit
    Prune {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &StorekeepPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> StorekeepResult<()> {
    let retention = settings.backup_retention.clone();
    let manager = BackupManager::new(paths.clone(), retention.clone());

    match cmd {
        BackupCommands::Create => {
            println!("Creating backup...");
            let (backup, pruned) = manager.create_backup_with_retention()?;
            println!("Backup created: {}", backup.name);
            println!("Location: {}", backup.path.display());
            if !pruned.is_empty() {
                println!("Pruned {} old backup(s).", pruned.len());
            }
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: storekeep backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for (i, backup) in backups.iter().enumerate() {
                let age = Local::now()
                    .naive_local()
                    .signed_duration_since(backup.created_at);

                if verbose {
                    println!(
                        "{}. {}\n   Created: {}\n   Files: {}\n   Size: {}\n   Age: {}\n",
                        i + 1,
                        backup.name,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S"),
                        backup.files.join(", "),
                        format_size(backup.size_bytes),
                        format_duration(age),
                    );
                } else {
                    println!(
                        "  {}. {} ({} ago, {})",
                        i + 1,
                        backup.name,
                        format_duration(age),
                        format_size(backup.size_bytes),
                    );
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let info = resolve_backup(&manager, &backup)?;

            let restore_manager = RestoreManager::new(paths.clone());
            let validation = restore_manager.validate_backup(&info.name)?;

            println!("Backup Information");
            println!("==================");
            println!("Name: {}", info.name);
            println!("Created: {}", info.created_at.format("%Y-%m-%d %H:%M:%S"));
            if validation.is_valid() {
                println!("Status: OK");
            } else {
                println!("Status: damaged ({})", validation.problems().join("; "));
            }
            println!();

            if !force {
                println!("WARNING: This will overwrite the current stores!");
                println!("To proceed, run again with --force flag:");
                println!("  storekeep backup restore {} --force", backup);
                return Ok(());
            }

            println!("Creating backup of current data before restore...");
            let pre_restore = manager.create_backup()?;
            println!("Pre-restore backup saved: {}", pre_restore.name);
            println!();

            println!("Restoring from backup...");
            let result = restore_manager.restore(&info.name)?;
            println!("Restore complete!");
            println!("{}", result.summary());
        }

        BackupCommands::Info { backup } => {
            let info = resolve_backup(&manager, &backup)?;
            let validation = RestoreManager::new(paths.clone()).validate_backup(&info.name)?;

            println!("Backup Details");
            println!("==============");
            println!("Name: {}", info.name);
            println!("Location: {}", info.path.display());
            println!("Size: {}", format_size(info.size_bytes));
            println!("Created: {}", info.created_at.format("%Y-%m-%d %H:%M:%S"));
            println!();
            println!("Contents:");
            for store in &validation.stores {
                if store.is_present() {
                    println!("  {:<15} {} record(s)", store.file, store.record_count());
                } else {
                    println!("  {:<15} absent", store.file);
                }
            }
            println!();
            println!(
                "Status: {}",
                if validation.is_valid() { "OK" } else { "Damaged" }
            );
        }

        BackupCommands::Prune { force } => {
            let backups = manager.list_backups()?;
            let to_delete = if retention.max_backups == 0 {
                0
            } else {
                backups.len().saturating_sub(retention.max_backups)
            };

            if to_delete == 0 {
                println!("No backups to prune.");
                println!(
                    "Retention policy keeps {} backup(s); you have {}.",
                    retention.max_backups,
                    backups.len()
                );
                return Ok(());
            }

            println!(
                "{} of {} backup(s) exceed the retention limit of {}.",
                to_delete,
                backups.len(),
                retention.max_backups
            );

            if !force {
                println!("To delete old backups, run again with --force flag:");
                println!("  storekeep backup prune --force");
                return Ok(());
            }

            let deleted = manager.enforce_retention()?;
            println!("Deleted {} backup(s).", deleted.len());
        }
    }

    Ok(())
}

/// Resolve a backup name, accepting `latest`
fn resolve_backup(manager: &BackupManager, backup: &str) -> StorekeepResult<BackupInfo> {
    let found = if backup.eq_ignore_ascii_case("latest") {
        manager.list_backups()?.into_iter().next()
    } else {
        manager.get_backup(backup)?
    };

    found.ok_or_else(|| StorekeepError::NotFound {
        entity_type: "Backup",
        identifier: backup.to_string(),
    })
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    format!("{}d", hours / 24)
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(chrono::Duration::seconds(42)), "42s");
        assert_eq!(format_duration(chrono::Duration::minutes(90)), "1h");
        assert_eq!(format_duration(chrono::Duration::days(3)), "3d");
    }
}

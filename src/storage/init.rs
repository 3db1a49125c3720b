//! Storage initialization
//!
//! Handles first-run setup: directories, settings file and the default admin.

use tracing::info;

use super::store::RecordStore;
use crate::config::paths::StorekeepPaths;
use crate::config::settings::Settings;
use crate::error::StorekeepResult;
use crate::models::User;

/// Prepare a data directory for use
///
/// Writes the settings file if missing and, when no users store exists yet,
/// creates it holding the configured default admin. Existing data is never
/// touched.
pub fn initialize_storage(paths: &StorekeepPaths, settings: &Settings) -> StorekeepResult<()> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        settings.save(paths)?;
    }

    if !paths.users_file().exists() {
        create_default_admin(paths, settings)?;
    }

    Ok(())
}

fn create_default_admin(paths: &StorekeepPaths, settings: &Settings) -> StorekeepResult<()> {
    let admin = &settings.default_admin;
    let user = User::new(&admin.username, &admin.password, true)?;
    RecordStore::<User>::open_unkeyed(paths.users_file()).append(&user)?;

    info!(username = %admin.username, "Created default admin user");
    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &StorekeepPaths) -> bool {
    !paths.settings_file().exists() || !paths.users_file().exists()
}

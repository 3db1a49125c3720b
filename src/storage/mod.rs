//! Storage layer for storekeep
//!
//! Each entity lives in its own fixed-size record file under `data/`. The
//! [`Storage`] coordinator owns one [`RecordStore`] per entity plus the audit
//! logger, and is shared by every service.

pub mod codec;
pub mod init;
pub mod layout;
pub mod store;

pub use codec::{Keyed, Record};
pub use init::{initialize_storage, needs_initialization};
pub use store::{Located, RecordIter, RecordPosition, RecordStore};

use serde::Serialize;
use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::StorekeepPaths;
use crate::config::settings::Settings;
use crate::error::StorekeepResult;
use crate::models::{Customer, InventoryItem, Order, User};

/// Main storage coordinator that provides access to every record store
pub struct Storage {
    paths: StorekeepPaths,
    pub inventory: RecordStore<InventoryItem>,
    pub customers: RecordStore<Customer>,
    pub orders: RecordStore<Order>,
    pub users: RecordStore<User>,
    audit: AuditLogger,
    audit_enabled: bool,
    actor: Option<String>,
}

impl Storage {
    /// Open every store under `paths`, creating directories as needed
    pub fn new(paths: StorekeepPaths) -> StorekeepResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            inventory: RecordStore::open(paths.inventory_file())?,
            customers: RecordStore::open(paths.customers_file())?,
            orders: RecordStore::open(paths.orders_file())?,
            users: RecordStore::open_unkeyed(paths.users_file()),
            audit: AuditLogger::new(paths.audit_log()),
            audit_enabled: true,
            actor: None,
            paths,
        })
    }

    /// Open storage honouring the audit preference in `settings`
    pub fn from_settings(paths: StorekeepPaths, settings: &Settings) -> StorekeepResult<Self> {
        let mut storage = Self::new(paths)?;
        storage.audit_enabled = settings.audit_enabled;
        Ok(storage)
    }

    pub fn paths(&self) -> &StorekeepPaths {
        &self.paths
    }

    pub fn audit_log(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record which user subsequent changes are attributed to
    pub fn set_actor(&mut self, username: impl Into<String>) {
        self.actor = Some(username.into());
    }

    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    fn write_audit(&self, entry: AuditEntry) {
        if !self.audit_enabled {
            return;
        }
        // The record change is already on disk, so audit failures are only logged.
        if let Err(e) = self.audit.log(&entry.by(self.actor())) {
            warn!(error = %e, "Failed to write audit entry");
        }
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.write_audit(AuditEntry::create(entity_type, entity_id, entity_name, entity));
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) {
        self.write_audit(AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ));
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.write_audit(AuditEntry::delete(entity_type, entity_id, entity_name, entity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomerFields, CustomerId};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorekeepPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("backups").exists());
        assert!(!storage.is_initialized());
        assert!(!storage.inventory.exists());
    }

    #[test]
    fn test_audit_attributed_to_actor() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorekeepPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.set_actor("clerk");

        let fields = CustomerFields::new("Jane", "jane@example.com", "555", "1 Elm").unwrap();
        let customer = Customer::from_fields(CustomerId::new(1), fields);
        storage.log_create(EntityType::Customer, "1", None, &customer);

        let entries = storage.audit_log().read_all().unwrap();
        assert_eq!(entries[0].actor.as_deref(), Some("clerk"));
    }

    #[test]
    fn test_audit_can_be_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorekeepPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            audit_enabled: false,
            ..Settings::default()
        };
        let storage = Storage::from_settings(paths, &settings).unwrap();

        storage.log_delete(EntityType::Order, "1", None, &serde_json::json!({}));
        assert!(!storage.audit_log().exists());
    }
}

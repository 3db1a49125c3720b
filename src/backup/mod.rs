//! Backup and restore of the record stores
//!
//! A backup is a directory under `backups/` named after the local time it was
//! taken (`YYYYMMDD_HHMMSS`, with `_N` appended when two backups land in the
//! same second) holding byte-for-byte copies of the store files.
//!
//! - `BackupManager`: create, list and prune backups
//! - `RestoreManager`: check a backup and copy it back over the live stores

mod manager;
mod restore;

pub use manager::{BackupInfo, BackupManager};
pub use restore::{RestoreManager, RestoreResult, StoreCheck, ValidationResult};

use crate::models::{Customer, InventoryItem, Order, User};
use crate::storage::Record;

/// Store file names paired with their record size
pub(crate) const STORE_FILES: [(&str, usize); 4] = [
    ("inventory.dat", InventoryItem::SIZE),
    ("customers.dat", Customer::SIZE),
    ("orders.dat", Order::SIZE),
    ("users.dat", User::SIZE),
];

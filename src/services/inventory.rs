//! Inventory service
//!
//! CRUD and search over the inventory store, plus the stock decrement used by
//! order placement. Field ranges are checked by the caller via
//! [`ItemFields::validate`]; this layer only enforces existence and stock rules.

use tracing::debug;

use crate::audit::EntityType;
use crate::error::{StorekeepError, StorekeepResult};
use crate::models::{InventoryId, InventoryItem, ItemFields};
use crate::storage::Storage;

/// Service for inventory management
pub struct InventoryService<'a> {
    storage: &'a Storage,
}

impl<'a> InventoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a new item under the next free id
    pub fn add(&self, fields: ItemFields) -> StorekeepResult<InventoryItem> {
        let id = InventoryId::new(self.storage.inventory.next_id()?);
        let item = InventoryItem::from_fields(id, fields);

        debug!(id = %item.id, name = %item.name, "Adding inventory item");
        self.storage.inventory.append(&item)?;

        self.storage.log_create(
            EntityType::InventoryItem,
            item.id.to_string(),
            Some(item.name.to_string()),
            &item,
        );

        Ok(item)
    }

    /// Replace the editable fields of an existing item
    pub fn update(&self, id: InventoryId, fields: ItemFields) -> StorekeepResult<InventoryItem> {
        let located = self
            .storage
            .inventory
            .find_by_key(id.get())?
            .ok_or_else(|| StorekeepError::item_not_found(id.to_string()))?;

        let before = located.record.clone();
        let mut item = located.record;
        item.apply(fields);

        debug!(id = %id, "Updating inventory item");
        self.storage.inventory.rewrite_at(located.position, &item)?;

        self.storage.log_update(
            EntityType::InventoryItem,
            id.to_string(),
            Some(item.name.to_string()),
            &before,
            &item,
        );

        Ok(item)
    }

    /// Delete an item, returning whether it existed
    pub fn delete(&self, id: InventoryId) -> StorekeepResult<bool> {
        let Some(existing) = self.find_by_id(id)? else {
            return Ok(false);
        };

        debug!(id = %id, "Deleting inventory item");
        let removed = self.storage.inventory.delete_where(|item| item.id == id)?;

        if removed > 0 {
            self.storage.log_delete(
                EntityType::InventoryItem,
                id.to_string(),
                Some(existing.name.to_string()),
                &existing,
            );
        }

        Ok(removed > 0)
    }

    pub fn find_by_id(&self, id: InventoryId) -> StorekeepResult<Option<InventoryItem>> {
        Ok(self
            .storage
            .inventory
            .find_by_key(id.get())?
            .map(|located| located.record))
    }

    /// Like `find_by_id`, but a missing item is an error
    pub fn get(&self, id: InventoryId) -> StorekeepResult<InventoryItem> {
        self.find_by_id(id)?
            .ok_or_else(|| StorekeepError::item_not_found(id.to_string()))
    }

    /// All items in storage order
    pub fn list(&self) -> StorekeepResult<Vec<InventoryItem>> {
        self.storage.inventory.load_all()
    }

    /// Items whose name or description contains `term` (case-sensitive)
    pub fn search(&self, term: &str) -> StorekeepResult<Vec<InventoryItem>> {
        let mut found = Vec::new();
        for item in self.list()? {
            if item.matches(term) {
                found.push(item);
            }
        }
        debug!(term = %term, count = found.len(), "Searched inventory");
        Ok(found)
    }

    pub fn count(&self) -> StorekeepResult<usize> {
        self.storage.inventory.count()
    }

    /// Remove `quantity` units from stock for an order line
    ///
    /// Fails with `ItemNotFound` if the item is absent and with
    /// `InsufficientStock` unless `1 <= quantity <= stock`. On success the
    /// decrement is written immediately and the item as it was before the
    /// decrement is returned, so its price and cost can be captured.
    pub(crate) fn take_stock(
        &self,
        id: InventoryId,
        quantity: u32,
    ) -> StorekeepResult<InventoryItem> {
        let located = self
            .storage
            .inventory
            .find_by_key(id.get())?
            .ok_or(StorekeepError::ItemNotFound(id))?;

        let before = located.record;
        if quantity == 0 || quantity > before.quantity {
            return Err(StorekeepError::InsufficientStock {
                item_id: id,
                requested: quantity,
                available: before.quantity,
            });
        }

        let mut after = before.clone();
        after.quantity -= quantity;

        debug!(id = %id, delta = quantity, remaining = after.quantity, "Taking stock");
        self.storage.inventory.rewrite_at(located.position, &after)?;

        self.storage.log_update(
            EntityType::InventoryItem,
            id.to_string(),
            Some(after.name.to_string()),
            &before,
            &after,
        );

        Ok(before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::StorekeepPaths;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorekeepPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn widget(name: &str, quantity: u32) -> ItemFields {
        ItemFields::new(
            name,
            "Test Description",
            Money::from_cents(1099),
            Money::from_cents(1999),
            quantity,
        )
        .unwrap()
    }

    #[test]
    fn test_add_and_find() {
        let (_temp_dir, storage) = create_test_storage();
        let service = InventoryService::new(&storage);

        let item = service.add(widget("Test Item", 100)).unwrap();
        assert_eq!(item.id, InventoryId::new(1));

        let found = service.find_by_id(item.id).unwrap().unwrap();
        assert_eq!(found, item);
    }

    #[test]
    fn test_ids_increase_after_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = InventoryService::new(&storage);

        for name in ["A", "B", "C"] {
            service.add(widget(name, 1)).unwrap();
        }
        assert!(service.delete(InventoryId::new(3)).unwrap());

        let next = service.add(widget("D", 1)).unwrap();
        assert_eq!(next.id, InventoryId::new(4));
    }

    #[test]
    fn test_update() {
        let (_temp_dir, storage) = create_test_storage();
        let service = InventoryService::new(&storage);
        let item = service.add(widget("Old", 10)).unwrap();

        service.update(item.id, widget("New", 20)).unwrap();

        let found = service.get(item.id).unwrap();
        assert_eq!(found.name.as_str(), "New");
        assert_eq!(found.quantity, 20);
    }

    #[test]
    fn test_update_missing_leaves_store_unchanged() {
        let (_temp_dir, storage) = create_test_storage();
        let service = InventoryService::new(&storage);
        let item = service.add(widget("Only", 10)).unwrap();

        let err = service.update(InventoryId::new(99), widget("X", 1)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(service.list().unwrap(), vec![item]);
    }

    #[test]
    fn test_delete_preserves_order() {
        let (_temp_dir, storage) = create_test_storage();
        let service = InventoryService::new(&storage);
        for name in ["A", "B", "C"] {
            service.add(widget(name, 1)).unwrap();
        }

        assert!(service.delete(InventoryId::new(2)).unwrap());
        assert!(!service.delete(InventoryId::new(2)).unwrap());
        assert!(service.find_by_id(InventoryId::new(2)).unwrap().is_none());

        let names: Vec<_> = service
            .list()
            .unwrap()
            .into_iter()
            .map(|i| i.name.into_inner())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_search() {
        let (_temp_dir, storage) = create_test_storage();
        let service = InventoryService::new(&storage);
        service.add(widget("Blue Widget", 1)).unwrap();
        service.add(widget("Red Gadget", 1)).unwrap();

        assert_eq!(service.search("Widget").unwrap().len(), 1);
        assert_eq!(service.search("Description").unwrap().len(), 2);
        assert!(service.search("widget").unwrap().is_empty());
    }

    #[test]
    fn test_search_on_empty_store() {
        let (_temp_dir, storage) = create_test_storage();
        let service = InventoryService::new(&storage);
        assert!(service.search("x").unwrap().is_empty());
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_take_stock() {
        let (_temp_dir, storage) = create_test_storage();
        let service = InventoryService::new(&storage);
        let item = service.add(widget("Widget", 10)).unwrap();

        let taken = service.take_stock(item.id, 4).unwrap();
        assert_eq!(taken.quantity, 10);
        assert_eq!(service.get(item.id).unwrap().quantity, 6);
    }

    #[test]
    fn test_take_stock_rejects_bad_quantities() {
        let (_temp_dir, storage) = create_test_storage();
        let service = InventoryService::new(&storage);
        let item = service.add(widget("Widget", 10)).unwrap();

        for quantity in [0, 11] {
            let err = service.take_stock(item.id, quantity).unwrap_err();
            assert!(matches!(err, StorekeepError::InsufficientStock { available: 10, .. }));
        }
        assert_eq!(service.get(item.id).unwrap().quantity, 10);

        let err = service.take_stock(InventoryId::new(9), 1).unwrap_err();
        assert!(matches!(err, StorekeepError::ItemNotFound(_)));
    }

    #[test]
    fn test_changes_are_audited() {
        let (_temp_dir, storage) = create_test_storage();
        let service = InventoryService::new(&storage);
        let item = service.add(widget("Widget", 10)).unwrap();
        service.update(item.id, widget("Widget", 5)).unwrap();
        service.delete(item.id).unwrap();

        let entries = storage.audit_log().read_all().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].diff_summary.as_deref(), Some("quantity: 10 -> 5"));
    }
}

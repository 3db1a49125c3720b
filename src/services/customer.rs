//! Customer service
//!
//! Same CRUD shape as inventory. Deleting a customer leaves their orders in
//! place; those orders keep the now-dangling customer id.

use tracing::debug;

use crate::audit::EntityType;
use crate::error::{StorekeepError, StorekeepResult};
use crate::models::{Customer, CustomerFields, CustomerId};
use crate::storage::Storage;

/// Service for customer management
pub struct CustomerService<'a> {
    storage: &'a Storage,
}

impl<'a> CustomerService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a new customer under the next free id
    pub fn add(&self, fields: CustomerFields) -> StorekeepResult<Customer> {
        let id = CustomerId::new(self.storage.customers.next_id()?);
        let customer = Customer::from_fields(id, fields);

        debug!(id = %customer.id, "Adding customer");
        self.storage.customers.append(&customer)?;

        self.storage.log_create(
            EntityType::Customer,
            customer.id.to_string(),
            Some(customer.name.to_string()),
            &customer,
        );

        Ok(customer)
    }

    pub fn update(&self, id: CustomerId, fields: CustomerFields) -> StorekeepResult<Customer> {
        let located = self
            .storage
            .customers
            .find_by_key(id.get())?
            .ok_or_else(|| StorekeepError::customer_not_found(id.to_string()))?;

        let before = located.record.clone();
        let mut customer = located.record;
        customer.apply(fields);

        debug!(id = %id, "Updating customer");
        self.storage.customers.rewrite_at(located.position, &customer)?;

        self.storage.log_update(
            EntityType::Customer,
            id.to_string(),
            Some(customer.name.to_string()),
            &before,
            &customer,
        );

        Ok(customer)
    }

    /// Delete a customer, returning whether they existed
    pub fn delete(&self, id: CustomerId) -> StorekeepResult<bool> {
        let Some(existing) = self.find_by_id(id)? else {
            return Ok(false);
        };

        debug!(id = %id, "Deleting customer");
        let removed = self.storage.customers.delete_where(|c| c.id == id)?;

        if removed > 0 {
            self.storage.log_delete(
                EntityType::Customer,
                id.to_string(),
                Some(existing.name.to_string()),
                &existing,
            );
        }

        Ok(removed > 0)
    }

    pub fn find_by_id(&self, id: CustomerId) -> StorekeepResult<Option<Customer>> {
        Ok(self
            .storage
            .customers
            .find_by_key(id.get())?
            .map(|located| located.record))
    }

    pub fn get(&self, id: CustomerId) -> StorekeepResult<Customer> {
        self.find_by_id(id)?
            .ok_or_else(|| StorekeepError::customer_not_found(id.to_string()))
    }

    pub fn list(&self) -> StorekeepResult<Vec<Customer>> {
        self.storage.customers.load_all()
    }

    /// Customers whose name or email contains `term` (case-sensitive)
    pub fn search(&self, term: &str) -> StorekeepResult<Vec<Customer>> {
        let found: Vec<_> = self
            .list()?
            .into_iter()
            .filter(|customer| customer.matches(term))
            .collect();
        debug!(term = %term, count = found.len(), "Searched customers");
        Ok(found)
    }

    pub fn count(&self) -> StorekeepResult<usize> {
        self.storage.customers.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::StorekeepPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorekeepPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn person(name: &str, email: &str) -> CustomerFields {
        CustomerFields::new(name, email, "1234567890", "123 Main St").unwrap()
    }

    #[test]
    fn test_add_and_find() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CustomerService::new(&storage);

        let customer = service.add(person("John Doe", "john@example.com")).unwrap();
        assert_eq!(customer.id, CustomerId::new(1));
        assert_eq!(service.find_by_id(customer.id).unwrap(), Some(customer));
    }

    #[test]
    fn test_duplicate_emails_allowed() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CustomerService::new(&storage);

        service.add(person("A", "shared@example.com")).unwrap();
        service.add(person("B", "shared@example.com")).unwrap();
        assert_eq!(service.count().unwrap(), 2);
    }

    #[test]
    fn test_update() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CustomerService::new(&storage);
        let customer = service.add(person("John Doe", "john@example.com")).unwrap();

        service
            .update(customer.id, person("John Doe", "jd@example.com"))
            .unwrap();
        assert_eq!(service.get(customer.id).unwrap().email.as_str(), "jd@example.com");

        let err = service
            .update(CustomerId::new(5), person("X", "x@example.com"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CustomerService::new(&storage);
        let customer = service.add(person("John Doe", "john@example.com")).unwrap();

        assert!(service.delete(customer.id).unwrap());
        assert!(service.find_by_id(customer.id).unwrap().is_none());
        assert!(!service.delete(customer.id).unwrap());
    }

    #[test]
    fn test_search_name_or_email() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CustomerService::new(&storage);
        service.add(person("John Doe", "john@example.com")).unwrap();
        service.add(person("Jane Roe", "jane@shop.test")).unwrap();

        assert_eq!(service.search("Doe").unwrap().len(), 1);
        assert_eq!(service.search("shop.test").unwrap().len(), 1);
        assert_eq!(service.search("J").unwrap().len(), 2);
        assert!(service.search("doe").unwrap().is_empty());
    }
}

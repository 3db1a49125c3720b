//! Customer model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CustomerId;
use super::text::{require_non_empty, Address, Email, Name, Phone};
use crate::error::StorekeepError;

/// A customer record. Emails are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,

    /// Customer name
    pub name: Name,

    /// Contact email
    pub email: Email,

    /// Contact phone number
    pub phone: Phone,

    /// Postal address
    pub address: Address,
}

impl Customer {
    /// Build a customer from validated fields
    pub fn from_fields(id: CustomerId, fields: CustomerFields) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            address: fields.address,
        }
    }

    /// Replace every editable field, keeping the id
    pub fn apply(&mut self, fields: CustomerFields) {
        self.name = fields.name;
        self.email = fields.email;
        self.phone = fields.phone;
        self.address = fields.address;
    }

    /// Whether the name or email contains `term` (case-sensitive)
    pub fn matches(&self, term: &str) -> bool {
        self.name.contains(term) || self.email.contains(term)
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

/// Editable fields of a customer, as supplied by the input layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerFields {
    pub name: Name,
    pub email: Email,
    pub phone: Phone,
    pub address: Address,
}

impl CustomerFields {
    /// Build fields, checking text lengths
    pub fn new(
        name: &str,
        email: &str,
        phone: &str,
        address: &str,
    ) -> Result<Self, StorekeepError> {
        Ok(Self {
            name: Name::new(name.trim())?,
            email: Email::new(email.trim())?,
            phone: Phone::new(phone.trim())?,
            address: Address::new(address.trim())?,
        })
    }

    /// Every field must be present
    pub fn validate(&self) -> Result<(), StorekeepError> {
        require_non_empty("Customer name", &self.name)?;
        require_non_empty("Customer email", &self.email)?;
        require_non_empty("Customer phone", &self.phone)?;
        require_non_empty("Customer address", &self.address)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Customer {
        let fields =
            CustomerFields::new("John Doe", "john@example.com", "1234567890", "123 Main St")
                .unwrap();
        Customer::from_fields(CustomerId::new(1), fields)
    }

    #[test]
    fn test_matches_name_or_email() {
        let customer = sample();
        assert!(customer.matches("John"));
        assert!(customer.matches("example.com"));
        assert!(!customer.matches("Main St"));
        assert!(!customer.matches("john doe"));
    }

    #[test]
    fn test_field_limits() {
        let long_phone = "1".repeat(21);
        assert!(CustomerFields::new("A", "a@b.c", &long_phone, "x").is_err());
    }

    #[test]
    fn test_validate_requires_all_fields() {
        let fields = CustomerFields::new("A", "", "1", "x").unwrap();
        assert!(fields.validate().is_err());
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut customer = sample();
        let fields = CustomerFields::new("Jane", "jane@example.com", "555", "9 Elm").unwrap();
        customer.apply(fields);
        assert_eq!(customer.id, CustomerId::new(1));
        assert_eq!(customer.name.as_str(), "Jane");
    }
}

//! Inventory item model
//!
//! An item carries its unit cost and selling price, so stock valuation and
//! per-order profit can be derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::InventoryId;
use super::money::Money;
use super::text::{require_non_empty, Description, Name};
use crate::error::StorekeepError;

/// Largest cost or price accepted at entry
pub const MAX_UNIT_AMOUNT: Money = Money::from_cents(100_000_000);

/// Largest quantity accepted at entry
pub const MAX_QUANTITY: u32 = 1_000_000;

/// A stocked item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique identifier
    pub id: InventoryId,

    /// Item name
    pub name: Name,

    /// Free-form description
    pub description: Description,

    /// What one unit costs the business
    pub cost: Money,

    /// What one unit sells for
    pub price: Money,

    /// Units in stock
    pub quantity: u32,
}

impl InventoryItem {
    /// Build an item from validated fields
    pub fn from_fields(id: InventoryId, fields: ItemFields) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            cost: fields.cost,
            price: fields.price,
            quantity: fields.quantity,
        }
    }

    /// Replace every editable field, keeping the id
    pub fn apply(&mut self, fields: ItemFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.cost = fields.cost;
        self.price = fields.price;
        self.quantity = fields.quantity;
    }

    /// Profit made on one unit
    pub fn unit_margin(&self) -> Money {
        self.price - self.cost
    }

    /// Cost of everything in stock
    pub fn stock_cost(&self) -> Money {
        self.cost.times(self.quantity)
    }

    /// Sale value of everything in stock
    pub fn stock_value(&self) -> Money {
        self.price.times(self.quantity)
    }

    /// Whether a name or description contains `term` (case-sensitive)
    pub fn matches(&self, term: &str) -> bool {
        self.name.contains(term) || self.description.contains(term)
    }
}

impl fmt::Display for InventoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

/// Editable fields of an inventory item, as supplied by the input layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    pub name: Name,
    pub description: Description,
    pub cost: Money,
    pub price: Money,
    pub quantity: u32,
}

impl ItemFields {
    /// Build fields, checking text lengths
    pub fn new(
        name: &str,
        description: &str,
        cost: Money,
        price: Money,
        quantity: u32,
    ) -> Result<Self, StorekeepError> {
        Ok(Self {
            name: Name::new(name.trim())?,
            description: Description::new(description.trim())?,
            cost,
            price,
            quantity,
        })
    }

    /// Range checks applied before an item reaches the store
    ///
    /// Cost must be in `0..=MAX_UNIT_AMOUNT`, price in `cost..=MAX_UNIT_AMOUNT`,
    /// quantity in `0..=MAX_QUANTITY`.
    pub fn validate(&self) -> Result<(), StorekeepError> {
        require_non_empty("Item name", &self.name)?;
        require_non_empty("Item description", &self.description)?;

        if self.cost.is_negative() || self.cost > MAX_UNIT_AMOUNT {
            return Err(StorekeepError::Validation(format!(
                "Cost must be between $0.00 and {}",
                MAX_UNIT_AMOUNT
            )));
        }
        if self.price < self.cost || self.price > MAX_UNIT_AMOUNT {
            return Err(StorekeepError::Validation(format!(
                "Price must be between the cost ({}) and {}",
                self.cost, MAX_UNIT_AMOUNT
            )));
        }
        if self.quantity > MAX_QUANTITY {
            return Err(StorekeepError::Validation(format!(
                "Quantity must be at most {}",
                MAX_QUANTITY
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(cost: i64, price: i64, quantity: u32) -> ItemFields {
        ItemFields::new(
            "Widget",
            "A useful widget",
            Money::from_cents(cost),
            Money::from_cents(price),
            quantity,
        )
        .unwrap()
    }

    #[test]
    fn test_valuation() {
        let item = InventoryItem::from_fields(InventoryId::new(1), fields(1000, 2000, 5));
        assert_eq!(item.stock_cost().cents(), 5000);
        assert_eq!(item.stock_value().cents(), 10000);
        assert_eq!(item.unit_margin().cents(), 1000);
    }

    #[test]
    fn test_validate_price_below_cost() {
        let err = fields(2000, 1999, 1).validate().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_validate_ranges() {
        assert!(fields(0, 0, 0).validate().is_ok());
        assert!(fields(-1, 10, 1).validate().is_err());
        assert!(fields(10, 10, MAX_QUANTITY + 1).validate().is_err());
    }

    #[test]
    fn test_validate_blank_name() {
        let blank = ItemFields::new(" ", "desc", Money::zero(), Money::zero(), 0).unwrap();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_matches_is_case_sensitive() {
        let item = InventoryItem::from_fields(InventoryId::new(1), fields(1, 2, 3));
        assert!(item.matches("Widg"));
        assert!(item.matches("useful"));
        assert!(!item.matches("widget"));
    }
}

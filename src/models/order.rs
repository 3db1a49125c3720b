//! Order model
//!
//! Orders capture their totals at placement time. Cost is never stored; it is
//! implied as `total_amount - profit`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CustomerId, InventoryId, OrderId};
use super::money::Money;

/// Order fulfilment status
///
/// Any status may be set from any other, including going back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Completed,
}

impl OrderStatus {
    /// All statuses in display order
    pub fn all() -> [OrderStatus; 3] {
        [Self::Pending, Self::Shipped, Self::Completed]
    }

    /// On-disk status byte
    pub const fn code(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Shipped => 1,
            Self::Completed => 2,
        }
    }

    /// Decode an on-disk status byte
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Pending),
            1 => Some(Self::Shipped),
            2 => Some(Self::Completed),
            _ => None,
        }
    }

    /// Parse a status name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "shipped" => Some(Self::Shipped),
            "completed" | "complete" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Shipped => write!(f, "Shipped"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// A placed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier
    pub id: OrderId,

    /// Customer the order was placed for
    pub customer_id: CustomerId,

    /// When the order was placed (second precision)
    pub order_date: DateTime<Utc>,

    /// Sum of price x quantity over all lines
    pub total_amount: Money,

    /// Fulfilment status
    pub status: OrderStatus,

    /// Sum of (price - cost) x quantity over all lines
    pub profit: Money,
}

impl Order {
    /// Cost of goods implied by the stored totals
    pub fn cost(&self) -> Money {
        self.total_amount - self.profit
    }
}

/// One (inventory item, quantity) pair requested in an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItem {
    pub item_id: InventoryId,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(item_id: InventoryId, quantity: u32) -> Self {
        Self { item_id, quantity }
    }
}

impl FromStr for LineItem {
    type Err = String;

    /// Parse `ITEM_ID:QUANTITY`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, qty) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected ITEM_ID:QUANTITY, got '{}'", s))?;
        let item_id = id.parse::<InventoryId>().map_err(|e| e.to_string())?;
        let quantity = qty
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid quantity '{}'", qty))?;
        Ok(Self { item_id, quantity })
    }
}

/// Filter for order searches; `None` fields match everything
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderFilter {
    pub customer_id: Option<CustomerId>,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        self.customer_id.map_or(true, |id| order.customer_id == id)
            && self.status.map_or(true, |status| order.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(1),
            customer_id: CustomerId::new(4),
            order_date: Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
            total_amount: Money::from_cents(10000),
            status,
            profit: Money::from_cents(5000),
        }
    }

    #[test]
    fn test_status_codes() {
        for status in OrderStatus::all() {
            assert_eq!(OrderStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(OrderStatus::from_code(9), None);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(OrderStatus::parse("Shipped"), Some(OrderStatus::Shipped));
        assert_eq!(OrderStatus::parse("completed"), Some(OrderStatus::Completed));
        assert_eq!(OrderStatus::parse("lost"), None);
    }

    #[test]
    fn test_implied_cost() {
        assert_eq!(order(OrderStatus::Pending).cost().cents(), 5000);
    }

    #[test]
    fn test_line_item_parse() {
        let line: LineItem = "3:12".parse().unwrap();
        assert_eq!(line, LineItem::new(InventoryId::new(3), 12));
        assert!("3".parse::<LineItem>().is_err());
        assert!("0:1".parse::<LineItem>().is_err());
        assert!("3:x".parse::<LineItem>().is_err());
    }

    #[test]
    fn test_filter() {
        let shipped = order(OrderStatus::Shipped);
        assert!(OrderFilter::default().matches(&shipped));
        assert!(OrderFilter {
            customer_id: Some(CustomerId::new(4)),
            status: Some(OrderStatus::Shipped),
        }
        .matches(&shipped));
        assert!(!OrderFilter {
            customer_id: None,
            status: Some(OrderStatus::Pending),
        }
        .matches(&shipped));
    }
}

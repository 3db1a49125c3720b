//! Financial reports for storekeep
//!
//! Read-only aggregations over the order and inventory stores: sales and
//! profit for a date range, and the current value of stock on hand.

pub mod inventory_value;
pub mod profit;
pub mod sales;

pub use inventory_value::InventoryValueReport;
pub use profit::ProfitReport;
pub use sales::SalesReport;

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

use crate::error::{StorekeepError, StorekeepResult};
use crate::models::Order;
use crate::storage::Storage;

/// Inclusive range of calendar days (UTC)
///
/// An order falls inside the range when the UTC day it was placed on is
/// between `start` and `end`, both included. A range whose start is after
/// its end contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range covering one day
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    pub fn contains(&self, moment: &DateTime<Utc>) -> bool {
        let day = moment.date_naive();
        self.start <= day && day <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Orders placed within `range`, in placement order
fn orders_in(storage: &Storage, range: &DateRange) -> StorekeepResult<Vec<Order>> {
    if range.is_empty() {
        return Ok(Vec::new());
    }
    Ok(storage
        .orders
        .load_all()?
        .into_iter()
        .filter(|order| range.contains(&order.order_date))
        .collect())
}

fn export_err(e: std::io::Error) -> StorekeepError {
    StorekeepError::Export(e.to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::TempDir;

    use crate::config::paths::StorekeepPaths;
    use crate::models::{CustomerId, Money, Order, OrderId, OrderStatus};
    use crate::storage::Storage;

    pub fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorekeepPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Append an order directly, bypassing stock checks
    pub fn add_order(storage: &Storage, day: NaiveDate, total: i64, profit: i64) -> Order {
        let id = storage.orders.next_id().unwrap();
        let order = Order {
            id: OrderId::new(id),
            customer_id: CustomerId::new(1),
            order_date: Utc
                .from_utc_datetime(&day.and_hms_opt(15, 30, 0).unwrap()),
            total_amount: Money::from_cents(total),
            status: OrderStatus::Pending,
            profit: Money::from_cents(profit),
        };
        storage.orders.append(&order).unwrap();
        order
    }
}

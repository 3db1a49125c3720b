//! Order service
//!
//! Placement resolves the customer, then walks the lines in order, taking
//! stock for each one as it goes. A failure on a later line does not restore
//! stock already taken for earlier lines, and no order is written.

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{debug, info};

use super::inventory::InventoryService;
use crate::audit::EntityType;
use crate::error::{StorekeepError, StorekeepResult};
use crate::models::{CustomerId, LineItem, Money, Order, OrderFilter, OrderId, OrderStatus};
use crate::storage::Storage;

/// Service for order placement and tracking
pub struct OrderService<'a> {
    storage: &'a Storage,
}

impl<'a> OrderService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Place an order dated now
    pub fn place(&self, customer_id: CustomerId, lines: &[LineItem]) -> StorekeepResult<Order> {
        self.place_at(customer_id, lines, Utc::now())
    }

    /// Place an order with an explicit order date
    ///
    /// Totals capture each item's price and cost at placement time, so later
    /// price changes do not affect this order.
    pub fn place_at(
        &self,
        customer_id: CustomerId,
        lines: &[LineItem],
        order_date: DateTime<Utc>,
    ) -> StorekeepResult<Order> {
        if lines.is_empty() {
            return Err(StorekeepError::Validation(
                "An order needs at least one line item".into(),
            ));
        }

        if self
            .storage
            .customers
            .find_by_key(customer_id.get())?
            .is_none()
        {
            return Err(StorekeepError::CustomerNotFound(customer_id));
        }

        let inventory = InventoryService::new(self.storage);
        let mut total_amount = Money::zero();
        let mut profit = Money::zero();

        for line in lines {
            let item = inventory.take_stock(line.item_id, line.quantity)?;
            total_amount += item.price.times(line.quantity);
            profit += item.unit_margin().times(line.quantity);
        }

        let order = Order {
            id: OrderId::new(self.storage.orders.next_id()?),
            customer_id,
            order_date: order_date.trunc_subsecs(0),
            total_amount,
            status: OrderStatus::Pending,
            profit,
        };

        self.storage.orders.append(&order)?;
        info!(
            id = %order.id,
            customer_id = %customer_id,
            lines = lines.len(),
            total = %order.total_amount,
            "Placed order"
        );

        self.storage
            .log_create(EntityType::Order, order.id.to_string(), None, &order);

        Ok(order)
    }

    /// Set an order's status; any status may follow any other
    pub fn update_status(&self, id: OrderId, status: OrderStatus) -> StorekeepResult<Order> {
        let located = self
            .storage
            .orders
            .find_by_key(id.get())?
            .ok_or_else(|| StorekeepError::order_not_found(id.to_string()))?;

        let before = located.record.clone();
        let mut order = located.record;
        order.status = status;

        debug!(id = %id, from = %before.status, to = %status, "Updating order status");
        self.storage.orders.rewrite_at(located.position, &order)?;

        self.storage
            .log_update(EntityType::Order, id.to_string(), None, &before, &order);

        Ok(order)
    }

    pub fn find_by_id(&self, id: OrderId) -> StorekeepResult<Option<Order>> {
        Ok(self
            .storage
            .orders
            .find_by_key(id.get())?
            .map(|located| located.record))
    }

    pub fn get(&self, id: OrderId) -> StorekeepResult<Order> {
        self.find_by_id(id)?
            .ok_or_else(|| StorekeepError::order_not_found(id.to_string()))
    }

    /// Every order in placement order
    pub fn list_all(&self) -> StorekeepResult<Vec<Order>> {
        self.storage.orders.load_all()
    }

    /// Orders matching `filter`
    pub fn search(&self, filter: &OrderFilter) -> StorekeepResult<Vec<Order>> {
        let found: Vec<_> = self
            .list_all()?
            .into_iter()
            .filter(|order| filter.matches(order))
            .collect();
        debug!(count = found.len(), "Searched orders");
        Ok(found)
    }
}

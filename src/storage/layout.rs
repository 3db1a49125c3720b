//! On-disk layouts for each entity
//!
//! | Record        | Fields                                                     | Bytes |
//! |---------------|------------------------------------------------------------|-------|
//! | InventoryItem | id u32, name 50, description 200, cost i64, price i64, qty u32 | 274 |
//! | Customer      | id u32, name 50, email 100, phone 20, address 200          | 374   |
//! | Order         | id u32, customer u32, date i64, total i64, status u8, profit i64 | 33 |
//! | User          | username 50, password 50, is_admin u8                      | 101   |
//!
//! Money is stored as cents and order dates as Unix seconds (UTC).

use chrono::{DateTime, Utc};

use super::codec::{Keyed, Record, RecordReader, RecordWriter};
use crate::error::{StorekeepError, StorekeepResult};
use crate::models::text::{
    MAX_ADDRESS_LENGTH, MAX_DESCRIPTION_LENGTH, MAX_EMAIL_LENGTH, MAX_NAME_LENGTH,
    MAX_PASSWORD_LENGTH, MAX_PHONE_LENGTH, MAX_USERNAME_LENGTH,
};
use crate::models::{
    Customer, CustomerId, InventoryId, InventoryItem, Money, Order, OrderId, OrderStatus, User,
};

impl Record for InventoryItem {
    const KIND: &'static str = "Inventory item";
    const SIZE: usize = 4 + MAX_NAME_LENGTH + MAX_DESCRIPTION_LENGTH + 8 + 8 + 4;

    fn encode(&self, out: &mut RecordWriter) {
        out.put_u32(self.id.get());
        out.put_text(&self.name);
        out.put_text(&self.description);
        out.put_i64(self.cost.cents());
        out.put_i64(self.price.cents());
        out.put_u32(self.quantity);
    }

    fn decode(input: &mut RecordReader<'_>) -> StorekeepResult<Self> {
        Ok(Self {
            id: InventoryId::new(input.get_u32()?),
            name: input.get_text()?,
            description: input.get_text()?,
            cost: Money::from_cents(input.get_i64()?),
            price: Money::from_cents(input.get_i64()?),
            quantity: input.get_u32()?,
        })
    }
}

impl Keyed for InventoryItem {
    fn key(&self) -> u32 {
        self.id.get()
    }
}

impl Record for Customer {
    const KIND: &'static str = "Customer";
    const SIZE: usize =
        4 + MAX_NAME_LENGTH + MAX_EMAIL_LENGTH + MAX_PHONE_LENGTH + MAX_ADDRESS_LENGTH;

    fn encode(&self, out: &mut RecordWriter) {
        out.put_u32(self.id.get());
        out.put_text(&self.name);
        out.put_text(&self.email);
        out.put_text(&self.phone);
        out.put_text(&self.address);
    }

    fn decode(input: &mut RecordReader<'_>) -> StorekeepResult<Self> {
        Ok(Self {
            id: CustomerId::new(input.get_u32()?),
            name: input.get_text()?,
            email: input.get_text()?,
            phone: input.get_text()?,
            address: input.get_text()?,
        })
    }
}

impl Keyed for Customer {
    fn key(&self) -> u32 {
        self.id.get()
    }
}

impl Record for Order {
    const KIND: &'static str = "Order";
    const SIZE: usize = 4 + 4 + 8 + 8 + 1 + 8;

    fn encode(&self, out: &mut RecordWriter) {
        out.put_u32(self.id.get());
        out.put_u32(self.customer_id.get());
        out.put_i64(self.order_date.timestamp());
        out.put_i64(self.total_amount.cents());
        out.put_u8(self.status.code());
        out.put_i64(self.profit.cents());
    }

    fn decode(input: &mut RecordReader<'_>) -> StorekeepResult<Self> {
        let id = OrderId::new(input.get_u32()?);
        let customer_id = CustomerId::new(input.get_u32()?);
        let seconds = input.get_i64()?;
        let order_date = DateTime::<Utc>::from_timestamp(seconds, 0).ok_or_else(|| {
            StorekeepError::Storage(format!("Order {} has an invalid date {}", id, seconds))
        })?;
        let total_amount = Money::from_cents(input.get_i64()?);
        let code = input.get_u8()?;
        let status = OrderStatus::from_code(code).ok_or_else(|| {
            StorekeepError::Storage(format!("Order {} has an invalid status {}", id, code))
        })?;
        let profit = Money::from_cents(input.get_i64()?);

        Ok(Self {
            id,
            customer_id,
            order_date,
            total_amount,
            status,
            profit,
        })
    }
}

impl Keyed for Order {
    fn key(&self) -> u32 {
        self.id.get()
    }
}

impl Record for User {
    const KIND: &'static str = "User";
    const SIZE: usize = MAX_USERNAME_LENGTH + MAX_PASSWORD_LENGTH + 1;

    fn encode(&self, out: &mut RecordWriter) {
        out.put_text(&self.username);
        out.put_text(&self.password);
        out.put_bool(self.is_admin);
    }

    fn decode(input: &mut RecordReader<'_>) -> StorekeepResult<Self> {
        Ok(Self {
            username: input.get_text()?,
            password: input.get_text()?,
            is_admin: input.get_bool()?,
        })
    }
}

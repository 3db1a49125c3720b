//! Core data models for storekeep
//!
//! This module contains the records kept by the business: inventory items,
//! customers, orders and user credentials, plus the value types they share.

pub mod customer;
pub mod ids;
pub mod inventory;
pub mod money;
pub mod order;
pub mod text;
pub mod user;

pub use customer::{Customer, CustomerFields};
pub use ids::{CustomerId, InventoryId, OrderId, ParseIdError};
pub use inventory::{InventoryItem, ItemFields};
pub use money::Money;
pub use order::{LineItem, Order, OrderFilter, OrderStatus};
pub use text::{Address, BoundedString, Description, Email, Name, Password, Phone, Username};
pub use user::{AccessLevel, User};

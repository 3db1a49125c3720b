//! Service layer for storekeep
//!
//! Business rules on top of the record stores: id assignment, stock checks,
//! order totals, credential checks and audit logging.

pub mod customer;
pub mod inventory;
pub mod order;
pub mod user;

pub use customer::CustomerService;
pub use inventory::InventoryService;
pub use order::OrderService;
pub use user::UserService;

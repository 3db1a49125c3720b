//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Argument parsers
//! shared by several commands live here.

pub mod backup;
pub mod customer;
pub mod inventory;
pub mod order;
pub mod report;
pub mod session;
pub mod user;

pub use backup::{handle_backup_command, BackupCommands};
pub use customer::{handle_customer_command, CustomerCommands};
pub use inventory::{handle_inventory_command, InventoryCommands};
pub use order::{handle_order_command, OrderCommands};
pub use report::{handle_report_command, ReportCommands};
pub use session::{login, Credentials, Session};
pub use user::{handle_user_command, UserCommands};

use chrono::NaiveDate;

use crate::models::{Money, OrderStatus};

/// Parse a money amount such as `19.99` or `$19.99`
pub(crate) fn parse_money(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}

/// Parse a `YYYY-MM-DD` date
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}': expected YYYY-MM-DD", s))
}

pub(crate) fn parse_status(s: &str) -> Result<OrderStatus, String> {
    OrderStatus::parse(s)
        .ok_or_else(|| format!("Unknown status '{}': use pending, shipped or completed", s))
}

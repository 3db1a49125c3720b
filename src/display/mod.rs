//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for each kind of record.

pub mod customer;
pub mod inventory;
pub mod order;
pub mod user;

pub use customer::{format_customer_details, format_customer_list};
pub use inventory::{format_item_details, format_item_list};
pub use order::{format_order_details, format_order_list};
pub use user::format_user_list;

/// Width of the widest value in a column, never narrower than its header
fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}

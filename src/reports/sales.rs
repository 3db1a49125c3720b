//! Sales Report
//!
//! Total takings, order count and average order value for a date range.

use std::io::Write;

use super::{export_err, orders_in, DateRange};
use crate::error::StorekeepResult;
use crate::models::{Money, Order};
use crate::storage::Storage;

/// Sales summary for a date range
#[derive(Debug, Clone)]
pub struct SalesReport {
    pub range: DateRange,
    /// Orders placed in the range, in placement order
    pub orders: Vec<Order>,
    pub total_sales: Money,
    pub order_count: usize,
    /// Zero when there are no orders
    pub average_order_value: Money,
}

impl SalesReport {
    pub fn generate(storage: &Storage, range: DateRange) -> StorekeepResult<Self> {
        let orders = orders_in(storage, &range)?;
        let total_sales: Money = orders.iter().map(|o| o.total_amount).sum();
        let order_count = orders.len();

        Ok(Self {
            range,
            average_order_value: total_sales.average(order_count),
            total_sales,
            order_count,
            orders,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Sales Report: {}\n", self.range));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if !self.orders.is_empty() {
            output.push_str(&format!(
                "{:<8} {:<12} {:<10} {:<10} {:>14}\n",
                "Order", "Date", "Customer", "Status", "Amount"
            ));
            output.push_str(&"-".repeat(60));
            output.push('\n');

            for order in &self.orders {
                output.push_str(&format!(
                    "{:<8} {:<12} {:<10} {:<10} {:>14}\n",
                    order.id.to_string(),
                    order.order_date.format("%Y-%m-%d").to_string(),
                    order.customer_id.to_string(),
                    order.status.to_string(),
                    order.total_amount.to_string()
                ));
            }
            output.push_str(&"-".repeat(60));
            output.push('\n');
        }

        output.push_str(&format!("{:<30} {:>14}\n", "Total Sales:", self.total_sales.to_string()));
        output.push_str(&format!("{:<30} {:>14}\n", "Number of Orders:", self.order_count));
        output.push_str(&format!(
            "{:<30} {:>14}\n",
            "Average Order Value:",
            self.average_order_value.to_string()
        ));

        output
    }

    /// Export one row per order followed by a summary row
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> StorekeepResult<()> {
        writeln!(writer, "Order ID,Date,Customer ID,Status,Amount").map_err(export_err)?;

        for order in &self.orders {
            writeln!(
                writer,
                "{},{},{},{},{:.2}",
                order.id,
                order.order_date.format("%Y-%m-%d"),
                order.customer_id,
                order.status,
                order.total_amount.as_units()
            )
            .map_err(export_err)?;
        }

        writeln!(
            writer,
            "TOTAL,{},{},{} orders,{:.2}",
            self.range.start,
            self.range.end,
            self.order_count,
            self.total_sales.as_units()
        )
        .map_err(export_err)?;

        Ok(())
    }
}

//! Profit Report
//!
//! Revenue, cost of goods and profit for a date range. An order's cost is
//! implied by its stored total and profit.

use std::io::Write;

use super::{export_err, orders_in, DateRange};
use crate::error::StorekeepResult;
use crate::models::Money;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct ProfitReport {
    pub range: DateRange,
    pub order_count: usize,
    pub total_revenue: Money,
    pub total_cost: Money,
    pub total_profit: Money,
    /// Profit as a percentage of revenue; zero when there is no revenue
    pub profit_margin: f64,
}

impl ProfitReport {
    pub fn generate(storage: &Storage, range: DateRange) -> StorekeepResult<Self> {
        let orders = orders_in(storage, &range)?;

        let mut total_revenue = Money::zero();
        let mut total_cost = Money::zero();
        let mut total_profit = Money::zero();
        for order in &orders {
            total_revenue += order.total_amount;
            total_cost += order.cost();
            total_profit += order.profit;
        }

        Ok(Self {
            range,
            order_count: orders.len(),
            total_revenue,
            total_cost,
            total_profit,
            profit_margin: total_profit.percent_of(total_revenue),
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Profit Report: {}\n", self.range));
        output.push_str(&"=".repeat(46));
        output.push('\n');
        output.push_str(&format!("{:<30} {:>15}\n", "Orders:", self.order_count));
        output.push_str(&format!(
            "{:<30} {:>15}\n",
            "Total Revenue:",
            self.total_revenue.to_string()
        ));
        output.push_str(&format!(
            "{:<30} {:>15}\n",
            "Total Cost:",
            self.total_cost.to_string()
        ));
        output.push_str(&"-".repeat(46));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>15}\n",
            "Total Profit:",
            self.total_profit.to_string()
        ));
        output.push_str(&format!(
            "{:<30} {:>14.2}%\n",
            "Profit Margin:", self.profit_margin
        ));

        output
    }

    pub fn export_csv<W: Write>(&self, writer: &mut W) -> StorekeepResult<()> {
        writeln!(
            writer,
            "Start Date,End Date,Orders,Revenue,Cost,Profit,Margin"
        )
        .map_err(export_err)?;

        writeln!(
            writer,
            "{},{},{},{:.2},{:.2},{:.2},{:.2}",
            self.range.start,
            self.range.end,
            self.order_count,
            self.total_revenue.as_units(),
            self.total_cost.as_units(),
            self.total_profit.as_units(),
            self.profit_margin
        )
        .map_err(export_err)?;

        Ok(())
    }
}

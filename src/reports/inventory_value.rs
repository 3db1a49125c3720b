//! Inventory Value Report
//!
//! What the stock on hand cost and what it would sell for.

use std::io::Write;

use super::export_err;
use crate::error::StorekeepResult;
use crate::models::Money;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct InventoryValueReport {
    /// Number of item records
    pub record_count: usize,
    /// Units in stock, summed over every item
    pub total_items: u64,
    /// Sum of cost x quantity
    pub total_cost: Money,
    /// Sum of price x quantity
    pub total_value: Money,
    /// Items with stock and a non-zero price
    pub items_with_value: usize,
}

impl InventoryValueReport {
    pub fn generate(storage: &Storage) -> StorekeepResult<Self> {
        let mut report = Self {
            record_count: 0,
            total_items: 0,
            total_cost: Money::zero(),
            total_value: Money::zero(),
            items_with_value: 0,
        };

        for item in storage.inventory.load_all()? {
            report.record_count += 1;
            report.total_items += u64::from(item.quantity);
            report.total_cost += item.stock_cost();
            report.total_value += item.stock_value();
            if item.quantity > 0 && item.price.is_positive() {
                report.items_with_value += 1;
            }
        }

        Ok(report)
    }

    /// Value minus cost of everything in stock
    pub fn potential_profit(&self) -> Money {
        self.total_value - self.total_cost
    }

    /// Potential profit as a percentage of value; zero when nothing has value
    pub fn profit_margin(&self) -> f64 {
        self.potential_profit().percent_of(self.total_value)
    }

    /// Average stock value per valued item
    pub fn average_value(&self) -> Money {
        self.total_value.average(self.items_with_value)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Inventory Value Report\n");
        output.push_str(&"=".repeat(46));
        output.push('\n');
        output.push_str(&format!("{:<30} {:>15}\n", "Item Records:", self.record_count));
        output.push_str(&format!("{:<30} {:>15}\n", "Units in Stock:", self.total_items));
        output.push_str(&format!(
            "{:<30} {:>15}\n",
            "Total Cost:",
            self.total_cost.to_string()
        ));
        output.push_str(&format!(
            "{:<30} {:>15}\n",
            "Total Value:",
            self.total_value.to_string()
        ));
        output.push_str(&"-".repeat(46));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>15}\n",
            "Potential Profit:",
            self.potential_profit().to_string()
        ));
        output.push_str(&format!(
            "{:<30} {:>14.2}%\n",
            "Profit Margin:",
            self.profit_margin()
        ));
        output.push_str(&format!(
            "{:<30} {:>15}\n",
            "Items with Value:", self.items_with_value
        ));
        output.push_str(&format!(
            "{:<30} {:>15}\n",
            "Average Value per Item:",
            self.average_value().to_string()
        ));

        output
    }

    pub fn export_csv<W: Write>(&self, writer: &mut W) -> StorekeepResult<()> {
        writeln!(
            writer,
            "Records,Units,Total Cost,Total Value,Potential Profit,Margin"
        )
        .map_err(export_err)?;

        writeln!(
            writer,
            "{},{},{:.2},{:.2},{:.2},{:.2}",
            self.record_count,
            self.total_items,
            self.total_cost.as_units(),
            self.total_value.as_units(),
            self.potential_profit().as_units(),
            self.profit_margin()
        )
        .map_err(export_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemFields;
    use crate::reports::test_support::create_test_storage;
    use crate::services::InventoryService;

    fn add_item(storage: &Storage, cost: i64, price: i64, quantity: u32) {
        InventoryService::new(storage)
            .add(
                ItemFields::new(
                    "Item",
                    "Stock",
                    Money::from_cents(cost),
                    Money::from_cents(price),
                    quantity,
                )
                .unwrap(),
            )
            .unwrap();
    }

    #[test]
    fn test_single_item() {
        let (_temp_dir, storage) = create_test_storage();
        add_item(&storage, 1000, 2000, 5);

        let report = InventoryValueReport::generate(&storage).unwrap();

        assert_eq!(report.total_items, 5);
        assert_eq!(report.total_cost, Money::from_cents(5000));
        assert_eq!(report.total_value, Money::from_cents(10000));
        assert_eq!(report.potential_profit(), Money::from_cents(5000));
        assert!((report.profit_margin() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_total_items_counts_units_not_records() {
        let (_temp_dir, storage) = create_test_storage();
        add_item(&storage, 100, 200, 3);
        add_item(&storage, 100, 200, 0);
        add_item(&storage, 0, 0, 4);

        let report = InventoryValueReport::generate(&storage).unwrap();
        assert_eq!(report.record_count, 3);
        assert_eq!(report.total_items, 7);
        assert_eq!(report.items_with_value, 1);
        assert_eq!(report.average_value(), Money::from_cents(600));
    }

    #[test]
    fn test_empty_inventory() {
        let (_temp_dir, storage) = create_test_storage();

        let report = InventoryValueReport::generate(&storage).unwrap();
        assert_eq!(report.total_items, 0);
        assert_eq!(report.profit_margin(), 0.0);
        assert!(report.average_value().is_zero());
    }

    #[test]
    fn test_export_csv() {
        let (_temp_dir, storage) = create_test_storage();
        add_item(&storage, 1000, 2000, 5);

        let report = InventoryValueReport::generate(&storage).unwrap();
        let mut csv = Vec::new();
        report.export_csv(&mut csv).unwrap();

        let text = String::from_utf8(csv).unwrap();
        assert!(text.ends_with("1,5,50.00,100.00,50.00,50.00\n"));
    }
}

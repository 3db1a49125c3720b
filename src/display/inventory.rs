//! Inventory display formatting

use super::column_width;
use crate::models::{InventoryItem, Money};

/// Format inventory items as a table with a stock value total
pub fn format_item_list(items: &[InventoryItem]) -> String {
    if items.is_empty() {
        return "No inventory items found.".to_string();
    }

    let name_width = column_width("Name", items.iter().map(|i| i.name.as_str()));

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:<name_width$}  {:>12}  {:>12}  {:>8}  {:>14}\n",
        "ID", "Name", "Cost", "Price", "Qty", "Stock Value",
    ));
    output.push_str(&format!(
        "{:->5}  {:-<name_width$}  {:->12}  {:->12}  {:->8}  {:->14}\n",
        "", "", "", "", "", "",
    ));

    for item in items {
        output.push_str(&format!(
            "{:>5}  {:<name_width$}  {:>12}  {:>12}  {:>8}  {:>14}\n",
            item.id.to_string(),
            item.name.as_str(),
            item.cost.to_string(),
            item.price.to_string(),
            item.quantity,
            item.stock_value().to_string(),
        ));
    }

    let total: Money = items.iter().map(InventoryItem::stock_value).sum();
    output.push_str(&format!(
        "{:>5}  {:<name_width$}  {:>12}  {:>12}  {:>8}  {:>14}\n",
        "",
        "TOTAL",
        "",
        "",
        items.iter().map(|i| u64::from(i.quantity)).sum::<u64>(),
        total.to_string(),
    ));

    output
}

/// Format a single item's details
pub fn format_item_details(item: &InventoryItem) -> String {
    let mut output = String::new();

    output.push_str(&format!("Item: {}\n", item.name));
    output.push_str(&format!("  ID:             {}\n", item.id));
    output.push_str(&format!("  Description:    {}\n", item.description));
    output.push_str(&format!("  Cost:           {}\n", item.cost));
    output.push_str(&format!("  Price:          {}\n", item.price));
    output.push_str(&format!("  Unit Margin:    {}\n", item.unit_margin()));
    output.push_str(&format!("  Quantity:       {}\n", item.quantity));
    output.push_str(&format!("  Stock Value:    {}\n", item.stock_value()));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InventoryId, ItemFields};

    fn item() -> InventoryItem {
        let fields = ItemFields::new(
            "Widget",
            "A useful widget",
            Money::from_cents(1000),
            Money::from_cents(2000),
            5,
        )
        .unwrap();
        InventoryItem::from_fields(InventoryId::new(3), fields)
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_item_list(&[]), "No inventory items found.");
    }

    #[test]
    fn test_list_has_total() {
        let output = format_item_list(&[item(), item()]);
        assert!(output.contains("Widget"));
        let total_line = output.lines().last().unwrap();
        assert!(total_line.contains("TOTAL"));
        assert!(total_line.contains("$200.00"));
        assert!(total_line.contains("10"));
    }

    #[test]
    fn test_details() {
        let output = format_item_details(&item());
        assert!(output.contains("Item: Widget"));
        assert!(output.contains("Unit Margin:    $10.00"));
    }
}

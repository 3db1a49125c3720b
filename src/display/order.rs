//! Order display formatting

use chrono::format::{Item, StrftimeItems};

use crate::models::{Money, Order};

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// `format` if chrono can render it, otherwise ISO dates
fn usable_date_format(format: &str) -> &str {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        FALLBACK_DATE_FORMAT
    } else {
        format
    }
}

/// Format orders as a table; dates use `date_format` (strftime)
pub fn format_order_list(orders: &[Order], date_format: &str) -> String {
    if orders.is_empty() {
        return "No orders found.".to_string();
    }

    let date_format = usable_date_format(date_format);
    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:>8}  {:<12}  {:<10}  {:>12}  {:>12}\n",
        "ID", "Customer", "Date", "Status", "Total", "Profit",
    ));
    output.push_str(&format!(
        "{:->5}  {:->8}  {:-<12}  {:-<10}  {:->12}  {:->12}\n",
        "", "", "", "", "", "",
    ));

    for order in orders {
        output.push_str(&format!(
            "{:>5}  {:>8}  {:<12}  {:<10}  {:>12}  {:>12}\n",
            order.id.to_string(),
            order.customer_id.to_string(),
            order.order_date.format(date_format).to_string(),
            order.status.to_string(),
            order.total_amount.to_string(),
            order.profit.to_string(),
        ));
    }

    let total: Money = orders.iter().map(|o| o.total_amount).sum();
    let profit: Money = orders.iter().map(|o| o.profit).sum();
    output.push_str(&format!(
        "{:>5}  {:>8}  {:<12}  {:<10}  {:>12}  {:>12}\n",
        "",
        "",
        "TOTAL",
        "",
        total.to_string(),
        profit.to_string(),
    ));

    output
}

/// Detail view of one order; the date part follows `date_format`
pub fn format_order_details(order: &Order, date_format: &str) -> String {
    let date_format = usable_date_format(date_format);
    let mut output = String::new();

    output.push_str(&format!("Order #{}\n", order.id));
    output.push_str(&format!("  Customer:  {}\n", order.customer_id));
    output.push_str(&format!(
        "  Placed:    {} {} UTC\n",
        order.order_date.format(date_format),
        order.order_date.format("%H:%M:%S")
    ));
    output.push_str(&format!("  Status:    {}\n", order.status));
    output.push_str(&format!("  Total:     {}\n", order.total_amount));
    output.push_str(&format!("  Cost:      {}\n", order.cost()));
    output.push_str(&format!("  Profit:    {}\n", order.profit));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomerId, OrderId, OrderStatus};
    use chrono::{TimeZone, Utc};

    fn order() -> Order {
        Order {
            id: OrderId::new(2),
            customer_id: CustomerId::new(1),
            order_date: Utc.with_ymd_and_hms(2021, 1, 2, 10, 0, 0).unwrap(),
            total_amount: Money::from_cents(9995),
            status: OrderStatus::Shipped,
            profit: Money::from_cents(4500),
        }
    }

    #[test]
    fn test_list_uses_date_format() {
        let output = format_order_list(&[order()], "%d/%m/%Y");
        assert!(output.contains("02/01/2021"));
        assert!(output.contains("Shipped"));
        assert!(output.lines().last().unwrap().contains("$99.95"));
    }

    #[test]
    fn test_bad_date_format_falls_back() {
        let output = format_order_list(&[order()], "%Q");
        assert!(output.contains("2021-01-02"));
    }

    #[test]
    fn test_details_show_cost() {
        let output = format_order_details(&order(), "%Y-%m-%d");
        assert!(output.contains("Order #2"));
        assert!(output.contains("Placed:    2021-01-02 10:00:00 UTC"));
        assert!(output.contains("Cost:      $54.95"));
    }

    #[test]
    fn test_details_use_date_format() {
        let output = format_order_details(&order(), "%d/%m/%Y");
        assert!(output.contains("Placed:    02/01/2021 10:00:00 UTC"));

        let fallback = format_order_details(&order(), "%Q");
        assert!(fallback.contains("Placed:    2021-01-02 10:00:00 UTC"));
    }
}

//! Customer display formatting

use super::column_width;
use crate::models::Customer;

/// Format customers as a table
pub fn format_customer_list(customers: &[Customer]) -> String {
    if customers.is_empty() {
        return "No customers found.".to_string();
    }

    let name_width = column_width("Name", customers.iter().map(|c| c.name.as_str()));
    let email_width = column_width("Email", customers.iter().map(|c| c.email.as_str()));

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:<name_width$}  {:<email_width$}  {}\n",
        "ID", "Name", "Email", "Phone",
    ));
    output.push_str(&format!(
        "{:->5}  {:-<name_width$}  {:-<email_width$}  {:-<10}\n",
        "", "", "", "",
    ));

    for customer in customers {
        output.push_str(&format!(
            "{:>5}  {:<name_width$}  {:<email_width$}  {}\n",
            customer.id.to_string(),
            customer.name.as_str(),
            customer.email.as_str(),
            customer.phone,
        ));
    }

    output
}

pub fn format_customer_details(customer: &Customer) -> String {
    let mut output = String::new();

    output.push_str(&format!("Customer: {}\n", customer.name));
    output.push_str(&format!("  ID:       {}\n", customer.id));
    output.push_str(&format!("  Email:    {}\n", customer.email));
    output.push_str(&format!("  Phone:    {}\n", customer.phone));
    output.push_str(&format!("  Address:  {}\n", customer.address));

    output
}

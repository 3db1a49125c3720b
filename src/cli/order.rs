//! Order CLI commands

use clap::Subcommand;

use super::parse_status;
use crate::config::Settings;
use crate::display::order::{format_order_details, format_order_list};
use crate::error::StorekeepResult;
use crate::models::{CustomerId, LineItem, OrderFilter, OrderId, OrderStatus};
use crate::services::OrderService;
use crate::storage::Storage;

/// Order subcommands
#[derive(Subcommand)]
pub enum OrderCommands {
    /// Place an order, taking stock for each line
    Place {
        /// Customer ID
        customer: CustomerId,
        /// Lines as ITEM_ID:QUANTITY, e.g. 3:2 5:1
        #[arg(required = true, num_args = 1..)]
        lines: Vec<LineItem>,
    },
    /// Change an order's status
    Status {
        /// Order ID
        id: OrderId,
        /// pending, shipped or completed
        #[arg(value_parser = parse_status)]
        status: OrderStatus,
    },
    /// Show order details
    Show {
        /// Order ID
        id: OrderId,
    },
    /// List orders
    List {
        /// Only orders for this customer
        #[arg(short, long)]
        customer: Option<CustomerId>,
        /// Only orders with this status
        #[arg(short, long, value_parser = parse_status)]
        status: Option<OrderStatus>,
    },
}

/// Handle an order command
pub fn handle_order_command(
    storage: &Storage,
    settings: &Settings,
    cmd: OrderCommands,
) -> StorekeepResult<()> {
    let service = OrderService::new(storage);

    match cmd {
        OrderCommands::Place { customer, lines } => {
            let order = service.place(customer, &lines)?;
            println!(
                "Placed order #{} for customer #{}: total {}, profit {}",
                order.id, order.customer_id, order.total_amount, order.profit
            );
        }

        OrderCommands::Status { id, status } => {
            let order = service.update_status(id, status)?;
            println!("Order #{} is now {}", order.id, order.status);
        }

        OrderCommands::Show { id } => {
            let order = service.get(id)?;
            print!("{}", format_order_details(&order, &settings.date_format));
        }

        OrderCommands::List { customer, status } => {
            let filter = OrderFilter {
                customer_id: customer,
                status,
            };
            let orders = service.search(&filter)?;
            println!("{}", format_order_list(&orders, &settings.date_format));
        }
    }

    Ok(())
}

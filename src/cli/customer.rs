//! Customer CLI commands

use clap::Subcommand;

use crate::display::customer::{format_customer_details, format_customer_list};
use crate::error::{StorekeepError, StorekeepResult};
use crate::models::{CustomerFields, CustomerId};
use crate::services::CustomerService;
use crate::storage::Storage;

/// Customer subcommands
#[derive(Subcommand)]
pub enum CustomerCommands {
    /// Add a new customer
    Add {
        /// Customer name
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        phone: String,
        #[arg(short, long)]
        address: String,
    },
    /// List all customers
    List,
    /// Show customer details
    Show {
        /// Customer ID
        id: CustomerId,
    },
    /// Search customers by name or email
    Search { term: String },
    /// Update a customer; omitted fields keep their values
    Update {
        /// Customer ID
        id: CustomerId,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
        #[arg(short, long)]
        address: Option<String>,
    },
    /// Delete a customer
    Delete {
        /// Customer ID
        id: CustomerId,
    },
}

/// Handle a customer command
pub fn handle_customer_command(storage: &Storage, cmd: CustomerCommands) -> StorekeepResult<()> {
    let service = CustomerService::new(storage);

    match cmd {
        CustomerCommands::Add {
            name,
            email,
            phone,
            address,
        } => {
            let fields = CustomerFields::new(&name, &email, &phone, &address)?;
            fields.validate()?;
            let customer = service.add(fields)?;
            println!("Added customer #{}: {}", customer.id, customer.name);
        }

        CustomerCommands::List => {
            let customers = service.list()?;
            if customers.is_empty() {
                println!("No customers yet.");
            } else {
                print!("{}", format_customer_list(&customers));
            }
        }

        CustomerCommands::Show { id } => {
            let customer = service.get(id)?;
            print!("{}", format_customer_details(&customer));
        }

        CustomerCommands::Search { term } => {
            let customers = service.search(&term)?;
            if customers.is_empty() {
                println!("No customers match '{}'.", term);
            } else {
                print!("{}", format_customer_list(&customers));
            }
        }

        CustomerCommands::Update {
            id,
            name,
            email,
            phone,
            address,
        } => {
            let current = service.get(id)?;
            let fields = CustomerFields::new(
                name.as_deref().unwrap_or(current.name.as_str()),
                email.as_deref().unwrap_or(current.email.as_str()),
                phone.as_deref().unwrap_or(current.phone.as_str()),
                address.as_deref().unwrap_or(current.address.as_str()),
            )?;
            fields.validate()?;
            let customer = service.update(id, fields)?;
            println!("Updated customer #{}: {}", customer.id, customer.name);
        }

        CustomerCommands::Delete { id } => {
            if service.delete(id)? {
                println!("Deleted customer #{}", id);
            } else {
                return Err(StorekeepError::customer_not_found(id.to_string()));
            }
        }
    }

    Ok(())
}

//! Inventory CLI commands

use clap::Subcommand;

use super::parse_money;
use crate::display::inventory::{format_item_details, format_item_list};
use crate::error::{StorekeepError, StorekeepResult};
use crate::models::{InventoryId, ItemFields, Money};
use crate::services::InventoryService;
use crate::storage::Storage;

/// Inventory subcommands
#[derive(Subcommand)]
pub enum InventoryCommands {
    /// Add a new item
    Add {
        /// Item name
        name: String,
        /// Item description
        #[arg(short, long)]
        description: String,
        /// Unit cost (e.g. 10.99)
        #[arg(short, long, value_parser = parse_money)]
        cost: Money,
        /// Unit selling price
        #[arg(short, long, value_parser = parse_money)]
        price: Money,
        /// Units in stock
        #[arg(short, long, default_value_t = 0)]
        quantity: u32,
    },
    /// List all items
    List,
    /// Show item details
    Show {
        /// Item ID
        id: InventoryId,
    },
    /// Search items by name or description
    Search {
        /// Text to look for (case-sensitive)
        term: String,
    },
    /// Update an item; omitted fields keep their values
    Update {
        /// Item ID
        id: InventoryId,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long, value_parser = parse_money)]
        cost: Option<Money>,
        #[arg(short, long, value_parser = parse_money)]
        price: Option<Money>,
        #[arg(short, long)]
        quantity: Option<u32>,
    },
    /// Delete an item
    Delete {
        /// Item ID
        id: InventoryId,
    },
}

/// Handle an inventory command
pub fn handle_inventory_command(storage: &Storage, cmd: InventoryCommands) -> StorekeepResult<()> {
    let service = InventoryService::new(storage);

    match cmd {
        InventoryCommands::Add {
            name,
            description,
            cost,
            price,
            quantity,
        } => {
            let fields = ItemFields::new(&name, &description, cost, price, quantity)?;
            fields.validate()?;
            let item = service.add(fields)?;
            println!("Added item #{}: {}", item.id, item.name);
        }

        InventoryCommands::List => {
            let items = service.list()?;
            if items.is_empty() {
                println!("No items in inventory.");
                println!("Add one with: storekeep inventory add");
            } else {
                print!("{}", format_item_list(&items));
            }
        }

        InventoryCommands::Show { id } => {
            let item = service.get(id)?;
            print!("{}", format_item_details(&item));
        }

        InventoryCommands::Search { term } => {
            let items = service.search(&term)?;
            if items.is_empty() {
                println!("No items match '{}'.", term);
            } else {
                print!("{}", format_item_list(&items));
            }
        }

        InventoryCommands::Update {
            id,
            name,
            description,
            cost,
            price,
            quantity,
        } => {
            let current = service.get(id)?;
            let fields = ItemFields::new(
                name.as_deref().unwrap_or(current.name.as_str()),
                description.as_deref().unwrap_or(current.description.as_str()),
                cost.unwrap_or(current.cost),
                price.unwrap_or(current.price),
                quantity.unwrap_or(current.quantity),
            )?;
            fields.validate()?;
            let item = service.update(id, fields)?;
            println!("Updated item #{}: {}", item.id, item.name);
        }

        InventoryCommands::Delete { id } => {
            if service.delete(id)? {
                println!("Deleted item #{}", id);
            } else {
                return Err(StorekeepError::item_not_found(id.to_string()));
            }
        }
    }

    Ok(())
}

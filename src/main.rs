use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storekeep::audit::EntityType;
use storekeep::cli::{
    handle_backup_command, handle_customer_command, handle_inventory_command,
    handle_order_command, handle_report_command, handle_user_command, login,
    session::prompt_new_password, BackupCommands, Credentials, CustomerCommands,
    InventoryCommands, OrderCommands, ReportCommands, UserCommands,
};
use storekeep::config::{paths::StorekeepPaths, settings::Settings};
use storekeep::services::UserService;
use storekeep::storage::{initialize_storage, needs_initialization, Storage};

#[derive(Parser)]
#[command(
    name = "storekeep",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based record keeper for a small business",
    long_about = "storekeep tracks inventory, customers and orders in fixed-size \
                  record files, and reports sales, profit and stock value from \
                  the command line."
)]
struct Cli {
    /// Username to log in as
    #[arg(short, long, global = true, env = "STOREKEEP_USER")]
    user: Option<String>,

    /// Password; prompted for when omitted
    #[arg(long, global = true, env = "STOREKEEP_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Inventory management commands
    #[command(subcommand, alias = "inv")]
    Inventory(InventoryCommands),

    /// Customer management commands
    #[command(subcommand)]
    Customer(CustomerCommands),

    /// Order placement and tracking
    #[command(subcommand)]
    Order(OrderCommands),

    /// Sales, profit and inventory value reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// User management (administrators only)
    #[command(subcommand)]
    User(UserCommands),

    /// Backup and restore (administrators only)
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Only entries for one kind of record
        #[arg(short, long, value_parser = parse_entity_type)]
        entity: Option<EntityType>,
    },

    /// Change your own password
    Passwd {
        /// New password; prompted for when omitted
        #[arg(long, env = "STOREKEEP_NEW_PASSWORD", hide_env_values = true)]
        new_password: Option<String>,
    },

    /// Create the data directory and default admin
    Init,

    /// Show current configuration and paths
    Config,
}

fn parse_entity_type(s: &str) -> Result<EntityType, String> {
    match s.to_ascii_lowercase().as_str() {
        "item" | "inventory" => Ok(EntityType::InventoryItem),
        "customer" => Ok(EntityType::Customer),
        "order" => Ok(EntityType::Order),
        "user" => Ok(EntityType::User),
        _ => Err(format!(
            "Unknown record kind '{}': use item, customer, order or user",
            s
        )),
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = StorekeepPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let first_run = needs_initialization(&paths);
    if first_run {
        initialize_storage(&paths, &settings)?;
    }

    let command = match cli.command {
        Some(Commands::Init) => {
            if first_run {
                println!("Initialized storekeep at: {}", paths.base_dir().display());
                println!(
                    "Default administrator '{}' created; change its password with 'storekeep passwd'.",
                    settings.default_admin.username
                );
            } else {
                println!("storekeep is already initialized at: {}", paths.base_dir().display());
            }
            return Ok(());
        }
        Some(Commands::Config) => {
            println!("storekeep Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Date format:     {}", settings.date_format);
            println!("  Audit enabled:   {}", settings.audit_enabled);
            println!("  Backups kept:    {}", settings.backup_retention.max_backups);
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("storekeep - small-business record keeper");
            println!();
            println!("Run 'storekeep --help' for usage information.");
            return Ok(());
        }
    };

    let mut storage = Storage::from_settings(paths.clone(), &settings)?;
    let session = login(
        &storage,
        Credentials {
            username: cli.user,
            password: cli.password,
        },
    )?;
    storage.set_actor(session.username.clone());

    match command {
        Commands::Inventory(cmd) => handle_inventory_command(&storage, cmd)?,
        Commands::Customer(cmd) => handle_customer_command(&storage, cmd)?,
        Commands::Order(cmd) => handle_order_command(&storage, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, cmd)?,
        Commands::User(cmd) => {
            session.require_admin()?;
            handle_user_command(&storage, cmd)?;
        }
        Commands::Backup(cmd) => {
            session.require_admin()?;
            handle_backup_command(&paths, &settings, cmd)?;
        }
        Commands::Audit { limit, entity } => {
            let log = storage.audit_log();
            let entries = match entity {
                Some(entity_type) => log.read_recent_for(entity_type, limit)?,
                None => log.read_recent(limit)?,
            };

            if entries.is_empty() {
                println!("No audit entries.");
                return Ok(());
            }
            for entry in &entries {
                println!("{}", entry.format_human_readable());
            }
            println!();
            println!(
                "Showing {} of {} entries in {}",
                entries.len(),
                log.entry_count()?,
                log.path().display()
            );
        }
        Commands::Passwd { new_password } => {
            let password = match new_password {
                Some(password) => password,
                None => prompt_new_password()?,
            };
            UserService::new(&storage).change_password(&session.username, &password)?;
            println!("Password changed for '{}'", session.username);
        }
        Commands::Init | Commands::Config => {}
    }

    Ok(())
}

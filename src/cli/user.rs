//! User management CLI commands
//!
//! Administrators only; the caller checks access before dispatching here.

use clap::Subcommand;

use super::session::prompt_new_password;
use crate::display::user::format_user_list;
use crate::error::StorekeepResult;
use crate::services::UserService;
use crate::storage::Storage;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Add a user
    Add {
        /// Login name (case-sensitive)
        username: String,
        /// Grant administrator rights
        #[arg(long)]
        admin: bool,
        /// Password for the new user; prompted for when omitted
        #[arg(long, env = "STOREKEEP_NEW_PASSWORD", hide_env_values = true)]
        new_password: Option<String>,
    },
    /// List users
    List,
    /// Set another user's password
    Passwd {
        username: String,
        /// New password; prompted for when omitted
        #[arg(long, env = "STOREKEEP_NEW_PASSWORD", hide_env_values = true)]
        new_password: Option<String>,
    },
}

/// Handle a user command
pub fn handle_user_command(storage: &Storage, cmd: UserCommands) -> StorekeepResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::Add {
            username,
            admin,
            new_password,
        } => {
            let password = match new_password {
                Some(password) => password,
                None => prompt_new_password()?,
            };
            let user = service.add(&username, &password, admin)?;
            let role = if user.is_admin { "administrator" } else { "user" };
            println!("Added {} '{}'", role, user.username);
        }

        UserCommands::List => {
            println!("{}", format_user_list(&service.list()?));
        }

        UserCommands::Passwd {
            username,
            new_password,
        } => {
            let password = match new_password {
                Some(password) => password,
                None => prompt_new_password()?,
            };
            service.change_password(&username, &password)?;
            println!("Password changed for '{}'", username);
        }
    }

    Ok(())
}

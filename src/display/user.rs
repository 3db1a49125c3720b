//! User display formatting

use super::column_width;
use crate::models::User;

/// Format users as a table; passwords are never shown
pub fn format_user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    let width = column_width("Username", users.iter().map(|u| u.username.as_str()));

    let mut output = String::new();
    output.push_str(&format!("{:<width$}  {}\n", "Username", "Admin"));
    output.push_str(&format!("{:-<width$}  {:-<5}\n", "", ""));
    for user in users {
        output.push_str(&format!(
            "{:<width$}  {}\n",
            user.username.as_str(),
            if user.is_admin { "Yes" } else { "No" }
        ));
    }

    output
}

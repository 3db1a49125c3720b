//! Login handling
//!
//! Every command except `init` and `config` runs as a logged-in user. The
//! username and password come from flags or environment variables, and are
//! prompted for when missing.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::error::{StorekeepError, StorekeepResult};
use crate::models::AccessLevel;
use crate::services::UserService;
use crate::storage::Storage;

/// Credentials supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// An authenticated user
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub access: AccessLevel,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.access.is_admin()
    }

    /// Fail unless the user is an administrator
    pub fn require_admin(&self) -> StorekeepResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(StorekeepError::Auth(format!(
                "User '{}' is not an administrator",
                self.username
            )))
        }
    }
}

/// Authenticate, prompting for whatever was not supplied
pub fn login(storage: &Storage, credentials: Credentials) -> StorekeepResult<Session> {
    let username = match credentials.username {
        Some(username) => username,
        None => prompt_line("Username: ")?,
    };
    let password = match credentials.password {
        Some(password) => password,
        None => prompt_password("Password: ")?,
    };

    let access = UserService::new(storage).authenticate(&username, &password)?;
    if !access.is_authenticated() {
        warn!(username = %username, "Login failed");
        return Err(StorekeepError::Auth("Invalid username or password".into()));
    }

    Ok(Session { username, access })
}

/// Prompt for a password without echoing it
pub fn prompt_password(prompt: &str) -> StorekeepResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| StorekeepError::Auth(format!("Failed to read password: {}", e)))
}

/// Prompt for a new password twice, failing if the entries differ
pub fn prompt_new_password() -> StorekeepResult<String> {
    let first = prompt_password("New password: ")?;
    let second = prompt_password("Confirm password: ")?;
    if first != second {
        return Err(StorekeepError::Validation("Passwords do not match".into()));
    }
    Ok(first)
}

fn prompt_line(prompt: &str) -> StorekeepResult<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::StorekeepPaths;
    use crate::config::Settings;
    use crate::storage::initialize_storage;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorekeepPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths, &Settings::default()).unwrap();
        (temp_dir, Storage::new(paths).unwrap())
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[test]
    fn test_admin_login() {
        let (_temp_dir, storage) = create_test_storage();
        let session = login(&storage, credentials("admin", "0000")).unwrap();
        assert!(session.is_admin());
        assert!(session.require_admin().is_ok());
    }

    #[test]
    fn test_regular_user_not_admin() {
        let (_temp_dir, storage) = create_test_storage();
        UserService::new(&storage).add("clerk", "pw", false).unwrap();

        let session = login(&storage, credentials("clerk", "pw")).unwrap();
        assert!(matches!(session.require_admin(), Err(StorekeepError::Auth(_))));
    }

    #[test]
    fn test_bad_password() {
        let (_temp_dir, storage) = create_test_storage();
        let err = login(&storage, credentials("admin", "wrong")).unwrap_err();
        assert!(matches!(err, StorekeepError::Auth(_)));
    }
}

//! User service
//!
//! Login checks and credential management over the users store. Usernames are
//! unique and compared case-sensitively.

use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{StorekeepError, StorekeepResult};
use crate::models::{AccessLevel, Password, User};
use crate::storage::Storage;

/// Service for user management
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Check credentials against the users store
    ///
    /// Unknown usernames and wrong passwords both yield `Denied`.
    pub fn authenticate(&self, username: &str, password: &str) -> StorekeepResult<AccessLevel> {
        let level = self
            .storage
            .users
            .find_first(|user| user.verify(username, password))?
            .map_or(AccessLevel::Denied, |located| located.record.access_level());

        debug!(username = %username, ?level, "Authentication attempt");
        Ok(level)
    }

    /// Create a user; fails with `Duplicate` if the username is taken
    pub fn add(&self, username: &str, password: &str, is_admin: bool) -> StorekeepResult<User> {
        let user = User::new(username, password, is_admin)?;

        if self.find(username)?.is_some() {
            return Err(StorekeepError::Duplicate {
                entity_type: "User",
                identifier: username.to_string(),
            });
        }

        self.storage.users.append(&user)?;
        info!(username = %username, is_admin, "Added user");

        self.storage
            .log_create(EntityType::User, username, None, &user);

        Ok(user)
    }

    /// Replace a user's password
    pub fn change_password(&self, username: &str, new_password: &str) -> StorekeepResult<User> {
        if new_password.is_empty() {
            return Err(StorekeepError::Validation("Password cannot be empty".into()));
        }
        let password = Password::new(new_password)?;

        let located = self
            .storage
            .users
            .find_first(|user| user.username.as_str() == username)?
            .ok_or_else(|| StorekeepError::user_not_found(username))?;

        let before = located.record.clone();
        let mut user = located.record;
        user.password = password;

        self.storage.users.rewrite_at(located.position, &user)?;
        info!(username = %username, "Changed password");

        self.storage
            .log_update(EntityType::User, username, None, &before, &user);

        Ok(user)
    }

    pub fn find(&self, username: &str) -> StorekeepResult<Option<User>> {
        Ok(self
            .storage
            .users
            .find_first(|user| user.username.as_str() == username)?
            .map(|located| located.record))
    }

    pub fn list(&self) -> StorekeepResult<Vec<User>> {
        self.storage.users.load_all()
    }
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
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_default_admin_can_log_in() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        assert_eq!(service.authenticate("admin", "0000").unwrap(), AccessLevel::Admin);
        assert_eq!(service.authenticate("admin", "1234").unwrap(), AccessLevel::Denied);
        assert_eq!(service.authenticate("ADMIN", "0000").unwrap(), AccessLevel::Denied);
    }

    #[test]
    fn test_regular_user() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        service.add("clerk", "pw", false).unwrap();
        assert_eq!(service.authenticate("clerk", "pw").unwrap(), AccessLevel::Regular);
        assert_eq!(service.list().unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let err = service.add("admin", "other", false).unwrap_err();
        assert!(matches!(err, StorekeepError::Duplicate { .. }));
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_change_password() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        service.change_password("admin", "s3cret").unwrap();
        assert_eq!(service.authenticate("admin", "0000").unwrap(), AccessLevel::Denied);
        assert_eq!(service.authenticate("admin", "s3cret").unwrap(), AccessLevel::Admin);

        assert!(service.change_password("ghost", "x").unwrap_err().is_not_found());
        assert!(service.change_password("admin", "").unwrap_err().is_validation());
    }

    #[test]
    fn test_audit_omits_password() {
        let (_temp_dir, storage) = create_test_storage();
        UserService::new(&storage).add("clerk", "hunter2", false).unwrap();

        let log = std::fs::read_to_string(storage.audit_log().path()).unwrap();
        assert!(log.contains("clerk"));
        assert!(!log.contains("hunter2"));
    }

    #[test]
    fn test_no_users_store_denies() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorekeepPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert_eq!(
            UserService::new(&storage).authenticate("admin", "0000").unwrap(),
            AccessLevel::Denied
        );
    }
}

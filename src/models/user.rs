//! User credential model
//!
//! Passwords are stored in clear text in the users store. They are skipped when
//! a user is serialized (for example into the audit log).

use serde::Serialize;

use super::text::{require_non_empty, Password, Username};
use crate::error::StorekeepError;

/// A login credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Unique, case-sensitive login name
    pub username: Username,

    #[serde(skip_serializing)]
    pub password: Password,

    /// Whether the user may manage users and backups
    pub is_admin: bool,
}

impl User {
    /// Create a user, validating both fields
    pub fn new(username: &str, password: &str, is_admin: bool) -> Result<Self, StorekeepError> {
        require_non_empty("Username", username)?;
        require_non_empty("Password", password)?;
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
            is_admin,
        })
    }

    /// Exact username and password match
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.username.as_str() == username && self.password.as_str() == password
    }

    /// Access level this user receives after logging in
    pub fn access_level(&self) -> AccessLevel {
        if self.is_admin {
            AccessLevel::Admin
        } else {
            AccessLevel::Regular
        }
    }
}

/// Outcome of a login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccessLevel {
    /// Unknown user or wrong password
    Denied,
    Regular,
    Admin,
}

impl AccessLevel {
    pub fn is_authenticated(&self) -> bool {
        *self != AccessLevel::Denied
    }

    pub fn is_admin(&self) -> bool {
        *self == AccessLevel::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_is_case_sensitive() {
        let user = User::new("admin", "0000", true).unwrap();
        assert!(user.verify("admin", "0000"));
        assert!(!user.verify("Admin", "0000"));
        assert!(!user.verify("admin", "0001"));
    }

    #[test]
    fn test_access_level() {
        assert_eq!(User::new("a", "b", true).unwrap().access_level(), AccessLevel::Admin);
        assert_eq!(User::new("a", "b", false).unwrap().access_level(), AccessLevel::Regular);
        assert!(!AccessLevel::Denied.is_authenticated());
        assert!(AccessLevel::Regular.is_authenticated());
        assert!(!AccessLevel::Regular.is_admin());
    }

    #[test]
    fn test_password_not_serialized() {
        let user = User::new("clerk", "secret", false).unwrap();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("clerk"));
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(User::new("", "x", false).is_err());
        assert!(User::new("x", "", false).is_err());
    }
}

//! Bounded-length text fields
//!
//! Every text column in a store occupies a fixed number of bytes on disk.
//! `BoundedString<N>` guarantees at construction time that its UTF-8 encoding
//! fits in `N` bytes and contains no NUL (the padding byte), so encoding a
//! record can never overflow or truncate a field.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

use crate::error::StorekeepError;

pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_DESCRIPTION_LENGTH: usize = 200;
pub const MAX_EMAIL_LENGTH: usize = 100;
pub const MAX_PHONE_LENGTH: usize = 20;
pub const MAX_ADDRESS_LENGTH: usize = 200;
pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MAX_PASSWORD_LENGTH: usize = 50;

/// A string whose UTF-8 encoding is at most `N` bytes
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoundedString<const N: usize>(String);

impl<const N: usize> BoundedString<N> {
    /// Maximum encoded length in bytes
    pub const CAPACITY: usize = N;

    /// Create a bounded string, failing with a validation error on overflow
    pub fn new(value: impl Into<String>) -> Result<Self, StorekeepError> {
        let value = value.into();
        if value.len() > N {
            return Err(StorekeepError::Validation(format!(
                "Text is {} bytes long, the limit is {}",
                value.len(),
                N
            )));
        }
        if value.contains('\0') {
            return Err(StorekeepError::Validation(
                "Text may not contain NUL characters".into(),
            ));
        }
        Ok(Self(value))
    }

    /// Borrow the text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<const N: usize> Deref for BoundedString<N> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl<const N: usize> fmt::Display for BoundedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<const N: usize> TryFrom<String> for BoundedString<N> {
    type Error = StorekeepError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const N: usize> TryFrom<&str> for BoundedString<N> {
    type Error = StorekeepError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const N: usize> From<BoundedString<N>> for String {
    fn from(value: BoundedString<N>) -> Self {
        value.0
    }
}

pub type Name = BoundedString<MAX_NAME_LENGTH>;
pub type Description = BoundedString<MAX_DESCRIPTION_LENGTH>;
pub type Email = BoundedString<MAX_EMAIL_LENGTH>;
pub type Phone = BoundedString<MAX_PHONE_LENGTH>;
pub type Address = BoundedString<MAX_ADDRESS_LENGTH>;
pub type Username = BoundedString<MAX_USERNAME_LENGTH>;
pub type Password = BoundedString<MAX_PASSWORD_LENGTH>;

/// Require a non-blank value, naming the field in the error
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), StorekeepError> {
    if value.trim().is_empty() {
        return Err(StorekeepError::Validation(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}

//! Caller account identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`AccountId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountIdValidationError {
    /// The account identifier was empty.
    #[error("account id must not be empty")]
    Empty,
    /// The account identifier carried surrounding whitespace.
    #[error("account id must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

/// Stable string identity of a caller, used for ownership comparison.
///
/// ## Invariants
/// - Non-empty.
/// - No leading or trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Validate and construct an [`AccountId`].
    pub fn new(id: impl Into<String>) -> Result<Self, AccountIdValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(AccountIdValidationError::Empty);
        }
        if id.trim() != id {
            return Err(AccountIdValidationError::SurroundingWhitespace);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

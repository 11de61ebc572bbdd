//! Port for resolving owner records by account identity.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::owner::Owner;
use crate::domain::AccountId;

/// Lookup port for owner identity records.
///
/// The core never mutates owners; it only resolves them when an operation
/// structurally requires one (store creation).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnerQueries: Send + Sync {
    /// Fetch the owner record for an account, if one exists.
    async fn find_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<Owner>, RepositoryError>;
}

/// Fixture that resolves no owners; store creation against it is always
/// forbidden.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOwnerQueries;

#[async_trait]
impl OwnerQueries for FixtureOwnerQueries {
    async fn find_by_account_id(
        &self,
        _account_id: &AccountId,
    ) -> Result<Option<Owner>, RepositoryError> {
        Ok(None)
    }
}

//! Port for user lookups keyed by unique attributes.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::user::User;
use crate::domain::AccountId;

/// Lookup port for user records by their unique attributes.
///
/// Lookups include soft-deleted users; callers decide whether a
/// deactivated account counts as present.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQueries: Send + Sync {
    /// Fetch a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by account identifier.
    async fn find_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<User>, RepositoryError>;
}

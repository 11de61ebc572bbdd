//! Predicate-scoped listing ports.
//!
//! Listing operations that filter by a foreign reference get their own
//! narrow ports so adapters can push the predicate into the store instead
//! of filtering in memory.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::entity::Entity;
use crate::domain::AccountId;

/// Listing scoped to an owning account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnerScopedQuery<E: Entity>: Send + Sync {
    /// Fetch every entity owned by `owner`, in store order.
    async fn find_all_by_owner(&self, owner: &AccountId) -> Result<Vec<E>, RepositoryError>;
}

/// Listing scoped to an order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderScopedQuery<E: Entity>: Send + Sync {
    /// Fetch every entity attached to `order_id`, in store order.
    async fn find_all_by_order(&self, order_id: i64) -> Result<Vec<E>, RepositoryError>;
}

//! Port for the entity store.
//!
//! [`EntityRepository`] is the keyed persistence contract every entity kind
//! shares: create/update via `save`, lookup, full listing, and permanent
//! delete. Adapters provide durability and transactional isolation; each
//! call is one transaction boundary, and concurrent writers to the same id
//! resolve last-writer-wins (no optimistic-concurrency token).

use std::marker::PhantomData;

use async_trait::async_trait;

use crate::domain::entity::Entity;

/// Errors raised by entity store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The store could not be reached.
    #[error("entity store connection failed: {message}")]
    Connection {
        /// Adapter-supplied diagnostic.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("entity store query failed: {message}")]
    Query {
        /// Adapter-supplied diagnostic.
        message: String,
    },
}

impl RepositoryError {
    /// Construct a [`RepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Construct a [`RepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Keyed persistence port for one entity kind.
///
/// `save` persists a new entity (assigning its id) or overwrites an
/// existing one, refreshing the update timestamp either way; the returned
/// value is the entity as stored. `delete` is permanent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityRepository<E: Entity>: Send + Sync {
    /// Persist the entity and return it as stored.
    async fn save(&self, entity: &E) -> Result<E, RepositoryError>;

    /// Fetch an entity by its store-assigned id.
    async fn find_by_id(&self, id: i64) -> Result<Option<E>, RepositoryError>;

    /// Fetch every entity of this kind, in store order.
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError>;

    /// Permanently remove the entity.
    async fn delete(&self, entity: &E) -> Result<(), RepositoryError>;
}

/// Fixture adapter for tests that do not exercise persistence: lookups find
/// nothing, listings are empty, and writes are accepted and discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEntityRepository<E>(PhantomData<E>);

impl<E> FixtureEntityRepository<E> {
    /// Construct the fixture.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for FixtureEntityRepository<E> {
    async fn save(&self, entity: &E) -> Result<E, RepositoryError> {
        Ok(entity.clone())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<E>, RepositoryError> {
        Ok(None)
    }

    async fn find_all(&self) -> Result<Vec<E>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _entity: &E) -> Result<(), RepositoryError> {
        Ok(())
    }
}

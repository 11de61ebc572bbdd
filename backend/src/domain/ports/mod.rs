//! Driven ports for the hexagonal boundary.

mod entity_repository;
mod identity;
mod owner_queries;
mod scoped_queries;
mod user_queries;

#[cfg(test)]
pub use entity_repository::MockEntityRepository;
pub use entity_repository::{EntityRepository, FixtureEntityRepository, RepositoryError};
#[cfg(test)]
pub use identity::MockIdentityContext;
pub use identity::{AnonymousIdentity, IdentityContext, StaticIdentity};
#[cfg(test)]
pub use owner_queries::MockOwnerQueries;
pub use owner_queries::{FixtureOwnerQueries, OwnerQueries};
#[cfg(test)]
pub use scoped_queries::{MockOrderScopedQuery, MockOwnerScopedQuery};
pub use scoped_queries::{OrderScopedQuery, OwnerScopedQuery};
#[cfg(test)]
pub use user_queries::MockUserQueries;
pub use user_queries::UserQueries;

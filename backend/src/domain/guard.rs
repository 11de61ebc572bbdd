//! Ownership-guarded mutation core.
//!
//! Every mutating operation in this crate runs the same sequence: fetch the
//! entity, check that the caller owns it, apply a partial update, and hand
//! the result back to the entity store. The routines here implement that
//! sequence once, generic over the capability traits in
//! [`crate::domain::entity`], so each service is a thin specialization.
//!
//! All failures are terminal: a missing entity, a mismatched owner, or a
//! closed edit window ends the operation with no retry and no partial
//! result. Transactional isolation for the fetch–mutate–persist span is the
//! entity store's responsibility; the core performs no locking of its own.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entity::{Entity, OwnedEntity, Patch, Timestamped};
use crate::domain::ports::{EntityRepository, RepositoryError};
use crate::domain::{AccountId, Error};

/// Translate an entity-store failure into the domain taxonomy.
pub(crate) fn map_repository_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Connection { message } => {
            Error::service_unavailable(format!("entity store unavailable: {message}"))
        }
        RepositoryError::Query { message } => {
            Error::internal(format!("entity store error: {message}"))
        }
    }
}

/// Resolve a lookup result, failing with `NotFound` when the id is absent.
///
/// The failure is terminal for the calling operation.
///
/// # Examples
/// ```
/// use backend::domain::guard::require_found;
/// use backend::domain::ErrorCode;
///
/// let missing: Option<backend::domain::Store> = None;
/// let err = require_found(missing, 9999).expect_err("absent id fails");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
pub fn require_found<E: Entity>(found: Option<E>, id: i64) -> Result<E, Error> {
    found.ok_or_else(|| Error::entity_not_found(E::KIND, id))
}

/// Pure ownership predicate: passes iff the caller's account identifier
/// matches the entity's owner.
///
/// An absent caller fails `Forbidden` whenever an owner is set. The check
/// has no side effects and runs strictly before any mutation step.
pub fn authorize<E: OwnedEntity>(entity: &E, caller: Option<&AccountId>) -> Result<(), Error> {
    match caller {
        Some(account_id) if entity.owner_account_id() == account_id => Ok(()),
        _ => {
            tracing::warn!(
                kind = %E::KIND,
                id = entity.raw_id(),
                "ownership check rejected caller",
            );
            Err(Error::forbidden(format!(
                "caller is not the owner of {} {}",
                E::KIND,
                entity.raw_id(),
            )))
        }
    }
}

/// Reject updates attempted after the edit window has closed.
///
/// The window is measured from the entity's creation timestamp; an entity
/// strictly older than `window` fails `ModificationPeriodExpired`. The
/// check does not depend on caller identity.
pub fn ensure_editable<E>(entity: &E, now: DateTime<Utc>, window: Duration) -> Result<(), Error>
where
    E: Entity + Timestamped,
{
    if now - entity.created_at() > window {
        return Err(Error::modification_period_expired(format!(
            "{} {} can no longer be modified",
            E::KIND,
            entity.raw_id(),
        )));
    }
    Ok(())
}

/// Fetch, authorize, patch, and persist an owned entity in one unit of work.
///
/// Returns the persisted entity as the store reports it (id unchanged,
/// update timestamp refreshed by the persistence boundary).
pub async fn guarded_update<E, R, P>(
    repo: &R,
    id: i64,
    patch: &P,
    caller: Option<&AccountId>,
) -> Result<E, Error>
where
    E: OwnedEntity,
    R: EntityRepository<E> + ?Sized,
    P: Patch<E>,
{
    let mut entity = require_found(
        repo.find_by_id(id).await.map_err(map_repository_error)?,
        id,
    )?;
    authorize(&entity, caller)?;
    patch.apply(&mut entity);
    repo.save(&entity).await.map_err(map_repository_error)
}

/// Fetch, authorize, and permanently delete an owned entity.
///
/// Removal is irreversible; there is no tombstone.
pub async fn guarded_delete<E, R>(repo: &R, id: i64, caller: Option<&AccountId>) -> Result<(), Error>
where
    E: OwnedEntity,
    R: EntityRepository<E> + ?Sized,
{
    let entity = require_found(
        repo.find_by_id(id).await.map_err(map_repository_error)?,
        id,
    )?;
    authorize(&entity, caller)?;
    repo.delete(&entity).await.map_err(map_repository_error)
}

/// Order a listing ascending by creation timestamp, regardless of the order
/// the entity store returned it in. Pure; ties keep their incoming order.
pub fn sorted_by_creation<E: Timestamped>(mut items: Vec<E>) -> Vec<E> {
    items.sort_by_key(Timestamped::created_at);
    items
}

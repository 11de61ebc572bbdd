//! Store domain service.
//!
//! Every mutation goes through the guarded-mutation core: fetch the store,
//! verify the caller owns it, apply the patch, persist. Reads are public
//! except the owner-scoped variants, which authorize against the caller.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::guard::{
    self, guarded_delete, guarded_update, map_repository_error, require_found, sorted_by_creation,
};
use crate::domain::ports::{EntityRepository, IdentityContext, OwnerQueries, OwnerScopedQuery};
use crate::domain::store::{Store, StoreDraft, StoreId, StorePatch, StoreSummary};
use crate::domain::{AccountId, Error};

/// Service for registering and managing stores.
#[derive(Clone)]
pub struct StoreService<R, O, I> {
    stores: Arc<R>,
    owners: Arc<O>,
    identity: Arc<I>,
    clock: Arc<dyn Clock>,
}

impl<R, O, I> StoreService<R, O, I> {
    /// Create a new service with its store repository, owner lookups,
    /// identity context, and clock.
    pub fn new(stores: Arc<R>, owners: Arc<O>, identity: Arc<I>, clock: Arc<dyn Clock>) -> Self {
        Self {
            stores,
            owners,
            identity,
            clock,
        }
    }
}

impl<R, O, I> StoreService<R, O, I>
where
    R: EntityRepository<Store> + OwnerScopedQuery<Store>,
    O: OwnerQueries,
    I: IdentityContext,
{
    fn caller(&self) -> Option<AccountId> {
        self.identity.current_account_id()
    }

    /// Register a new store owned by the caller.
    ///
    /// Fails `Forbidden` before any persistence call when the caller is
    /// anonymous or has no owner record.
    pub async fn create(&self, draft: StoreDraft) -> Result<Store, Error> {
        let Some(account_id) = self.caller() else {
            return Err(Error::forbidden("store creation requires an owner account"));
        };
        let owner = self
            .owners
            .find_by_account_id(&account_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::forbidden("store creation requires an owner account"))?;

        let store = Store::new(draft, owner.account_id().clone(), self.clock.utc());
        let saved = self
            .stores
            .save(&store)
            .await
            .map_err(map_repository_error)?;
        tracing::info!(store_id = %saved.id(), owner = %account_id, "store registered");
        Ok(saved)
    }

    /// Update a store's descriptive fields. Guarded: only the owner may
    /// update, and absent patch fields leave attributes unchanged.
    pub async fn update(&self, id: StoreId, patch: &StorePatch) -> Result<Store, Error> {
        let caller = self.caller();
        guarded_update(self.stores.as_ref(), id.get(), patch, caller.as_ref()).await
    }

    /// Permanently delete a store. Guarded: only the owner may delete.
    pub async fn delete(&self, id: StoreId) -> Result<(), Error> {
        let caller = self.caller();
        guarded_delete::<Store, _>(self.stores.as_ref(), id.get(), caller.as_ref()).await
    }

    /// List every store as a summary, sorted ascending by creation time.
    pub async fn find_all(&self) -> Result<Vec<StoreSummary>, Error> {
        let stores = self
            .stores
            .find_all()
            .await
            .map_err(map_repository_error)?;
        Ok(sorted_by_creation(stores)
            .iter()
            .map(StoreSummary::from)
            .collect())
    }

    /// Public detail read; no authorization.
    pub async fn find_by_id(&self, id: StoreId) -> Result<Store, Error> {
        let found = self
            .stores
            .find_by_id(id.get())
            .await
            .map_err(map_repository_error)?;
        require_found(found, id.get())
    }

    /// List the caller's own stores as summaries, sorted ascending by
    /// creation time.
    pub async fn find_all_for_owner(&self) -> Result<Vec<StoreSummary>, Error> {
        let Some(account_id) = self.caller() else {
            return Err(Error::forbidden("store listing requires an owner account"));
        };
        let stores = self
            .stores
            .find_all_by_owner(&account_id)
            .await
            .map_err(map_repository_error)?;
        Ok(sorted_by_creation(stores)
            .iter()
            .map(StoreSummary::from)
            .collect())
    }

    /// Detail read of one of the caller's own stores; fails `Forbidden`
    /// when the store belongs to someone else.
    pub async fn find_for_owner(&self, id: StoreId) -> Result<Store, Error> {
        let caller = self.caller();
        let store = self.find_by_id(id).await?;
        guard::authorize(&store, caller.as_ref())?;
        Ok(store)
    }
}

#[cfg(test)]
#[path = "store_service_tests.rs"]
mod tests;

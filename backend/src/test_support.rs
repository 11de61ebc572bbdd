//! Test utilities for the backend crate.
//!
//! Shared doubles for unit tests (in `src/`) and integration tests (in
//! `tests/`): an in-memory entity store standing in for durable storage,
//! and a mutable clock for exercising time-window behaviour.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, Utc};
use mockable::Clock;

use crate::domain::ports::{
    EntityRepository, OrderScopedQuery, OwnerQueries, OwnerScopedQuery, RepositoryError,
    UserQueries,
};
use crate::domain::{AccountId, Entity, Owner, OwnedEntity, Review, User};

/// In-memory entity store for one entity kind.
///
/// Assigns ids sequentially on first save, refreshes the update timestamp
/// on every save, and serves lookups from a mutex-guarded table. Each call
/// is atomic, mirroring the one-transaction-per-call contract of the port.
pub struct InMemoryRepository<E> {
    state: Mutex<TableState<E>>,
}

struct TableState<E> {
    rows: Vec<E>,
    next_id: i64,
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryRepository<E> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TableState {
                rows: Vec::new(),
                next_id: 0,
            }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, TableState<E>>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::query("table mutex poisoned"))
    }
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for InMemoryRepository<E> {
    async fn save(&self, entity: &E) -> Result<E, RepositoryError> {
        let mut state = self.lock()?;
        let mut stored = entity.clone();
        if stored.raw_id() == 0 {
            state.next_id += 1;
            stored.assign_id(state.next_id);
        }
        stored.touch(Utc::now());
        match state
            .rows
            .iter()
            .position(|row| row.raw_id() == stored.raw_id())
        {
            Some(index) => state.rows[index] = stored.clone(),
            None => state.rows.push(stored.clone()),
        }
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.rows.iter().find(|row| row.raw_id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<E>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.rows.clone())
    }

    async fn delete(&self, entity: &E) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        state.rows.retain(|row| row.raw_id() != entity.raw_id());
        Ok(())
    }
}

#[async_trait]
impl<E: OwnedEntity> OwnerScopedQuery<E> for InMemoryRepository<E> {
    async fn find_all_by_owner(&self, owner: &AccountId) -> Result<Vec<E>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .rows
            .iter()
            .filter(|row| row.owner_account_id() == owner)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OrderScopedQuery<Review> for InMemoryRepository<Review> {
    async fn find_all_by_order(&self, order_id: i64) -> Result<Vec<Review>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .rows
            .iter()
            .filter(|row| row.order_id() == order_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OwnerQueries for InMemoryRepository<Owner> {
    async fn find_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<Owner>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .rows
            .iter()
            .find(|row| row.account_id() == account_id)
            .cloned())
    }
}

#[async_trait]
impl UserQueries for InMemoryRepository<User> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .rows
            .iter()
            .find(|row| row.username() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.rows.iter().find(|row| row.email() == email).cloned())
    }

    async fn find_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<User>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .rows
            .iter()
            .find(|row| row.account_id() == account_id)
            .cloned())
    }
}

/// Clock whose current instant tests can move freely.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Replace the current instant.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    /// Move the clock forward (or backward with a negative delta).
    pub fn advance(&self, delta: Duration) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex poisoned"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

//! Store aggregate: a gym or shop managed by exactly one owner.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, EntityKind, OwnedEntity, Patch, Timestamped};
use crate::domain::AccountId;

/// Store-assigned numeric identifier for a [`Store`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StoreId(i64);

impl StoreId {
    /// Wrap a raw id as assigned by the entity store.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors returned by [`StoreDraft::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreValidationError {
    /// The store name was empty or whitespace-only.
    #[error("store name must not be empty")]
    EmptyName,
}

/// A gym or shop registered by an owner.
///
/// ## Invariants
/// - Exactly one owner; `owner_account_id` is set at construction and never
///   reassigned.
/// - `created_at` never changes; `updated_at` is refreshed by the
///   persistence boundary on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    id: StoreId,
    name: String,
    description: String,
    address: String,
    owner_account_id: AccountId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated payload for registering a new store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDraft {
    name: String,
    description: String,
    address: String,
}

impl StoreDraft {
    /// Validate and construct a draft.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self, StoreValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StoreValidationError::EmptyName);
        }
        Ok(Self {
            name,
            description: description.into(),
            address: address.into(),
        })
    }
}

/// Partial update for a store; absent fields leave the attribute unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePatch {
    /// Replacement name, when present.
    pub name: Option<String>,
    /// Replacement description, when present.
    pub description: Option<String>,
    /// Replacement address, when present.
    pub address: Option<String>,
}

/// Listing projection: id and name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    /// Store id.
    pub id: StoreId,
    /// Store name.
    pub name: String,
}

impl Store {
    /// Construct a not-yet-persisted store owned by `owner_account_id`.
    ///
    /// The entity store assigns the id on first save.
    pub fn new(draft: StoreDraft, owner_account_id: AccountId, now: DateTime<Utc>) -> Self {
        Self {
            id: StoreId::new(0),
            name: draft.name,
            description: draft.description,
            address: draft.address,
            owner_account_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Store id.
    pub fn id(&self) -> StoreId {
        self.id
    }

    /// Store name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Descriptive text shown on the store page.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Street address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// When the store was last persisted.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for Store {
    const KIND: EntityKind = EntityKind::Store;

    fn raw_id(&self) -> i64 {
        self.id.get()
    }

    fn assign_id(&mut self, id: i64) {
        self.id = StoreId::new(id);
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl OwnedEntity for Store {
    fn owner_account_id(&self) -> &AccountId {
        &self.owner_account_id
    }
}

impl Timestamped for Store {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Patch<Store> for StorePatch {
    fn apply(&self, entity: &mut Store) {
        if let Some(name) = &self.name {
            entity.name = name.clone();
        }
        if let Some(description) = &self.description {
            entity.description = description.clone();
        }
        if let Some(address) = &self.address {
            entity.address = address.clone();
        }
    }
}

impl From<&Store> for StoreSummary {
    fn from(store: &Store) -> Self {
        Self {
            id: store.id,
            name: store.name.clone(),
        }
    }
}

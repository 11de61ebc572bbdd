//! Owner aggregate: an account that can register and manage stores.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, EntityKind, Timestamped};
use crate::domain::AccountId;

/// Store-assigned numeric identifier for an [`Owner`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OwnerId(i64);

impl OwnerId {
    /// Wrap a raw id as assigned by the entity store.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A store-owning principal. The core never mutates identity records; this
/// type exists for lookups during store creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    id: OwnerId,
    account_id: AccountId,
    display_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Owner {
    /// Construct a not-yet-persisted owner record.
    pub fn new(account_id: AccountId, display_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: OwnerId::new(0),
            account_id,
            display_name: display_name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Owner id.
    pub fn id(&self) -> OwnerId {
        self.id
    }

    /// Unique account identifier.
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Human readable name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl Entity for Owner {
    const KIND: EntityKind = EntityKind::Owner;

    fn raw_id(&self) -> i64 {
        self.id.get()
    }

    fn assign_id(&mut self, id: i64) {
        self.id = OwnerId::new(id);
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Timestamped for Owner {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

//! Trainer aggregate and its listing projection.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, EntityKind, Timestamped};

/// Store-assigned numeric identifier for a [`Trainer`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TrainerId(i64);

impl TrainerId {
    /// Wrap a raw id as assigned by the entity store.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TrainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A trainer offering sessions at a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trainer {
    id: TrainerId,
    name: String,
    picture: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Listing projection for trainers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerSummary {
    /// Trainer id.
    pub id: TrainerId,
    /// Trainer name.
    pub name: String,
    /// Profile picture URL, when one has been uploaded.
    pub picture: Option<String>,
}

impl Trainer {
    /// Construct a not-yet-persisted trainer.
    pub fn new(name: impl Into<String>, picture: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: TrainerId::new(0),
            name: name.into(),
            picture,
            created_at: now,
            updated_at: now,
        }
    }

    /// Trainer id.
    pub fn id(&self) -> TrainerId {
        self.id
    }

    /// Trainer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Profile picture URL.
    pub fn picture(&self) -> Option<&str> {
        self.picture.as_deref()
    }
}

impl Entity for Trainer {
    const KIND: EntityKind = EntityKind::Trainer;

    fn raw_id(&self) -> i64 {
        self.id.get()
    }

    fn assign_id(&mut self, id: i64) {
        self.id = TrainerId::new(id);
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Timestamped for Trainer {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl From<&Trainer> for TrainerSummary {
    fn from(trainer: &Trainer) -> Self {
        Self {
            id: trainer.id,
            name: trainer.name.clone(),
            picture: trainer.picture.clone(),
        }
    }
}

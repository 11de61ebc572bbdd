//! Entity capability traits shared by the guarded-mutation core.
//!
//! The guarded routines in [`crate::domain::guard`] are generic over these
//! capabilities rather than over concrete entity types: an entity exposes a
//! kind tag and a numeric id, optionally an owner account identifier, and a
//! creation timestamp. Patches describe partial updates where absent fields
//! leave the corresponding attribute unchanged.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::AccountId;

/// Tag identifying which schema an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A registered member account.
    User,
    /// A store-owning account.
    Owner,
    /// A gym or shop managed by an owner.
    Store,
    /// A customer review attached to an order.
    Review,
    /// A trainer offering sessions at a store.
    Trainer,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::User => "user",
            Self::Owner => "owner",
            Self::Store => "store",
            Self::Review => "review",
            Self::Trainer => "trainer",
        };
        f.write_str(label)
    }
}

/// An entity persisted by the entity store.
///
/// Ids are assigned by the store at creation and are immutable and unique
/// within their kind; a raw id of zero marks a not-yet-persisted instance.
/// [`Entity::assign_id`] and [`Entity::touch`] exist for persistence
/// adapters only — the core never calls them.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Kind tag for this entity type.
    const KIND: EntityKind;

    /// Store-assigned numeric id, or zero when not yet persisted.
    fn raw_id(&self) -> i64;

    /// Record the store-assigned id. Persistence boundary only.
    fn assign_id(&mut self, id: i64);

    /// Refresh the update timestamp. Persistence boundary only.
    fn touch(&mut self, at: DateTime<Utc>);
}

/// An entity with exactly one owning account, set at construction and never
/// reassigned.
pub trait OwnedEntity: Entity {
    /// Account identifier of the owning principal.
    fn owner_account_id(&self) -> &AccountId;
}

/// An entity carrying its creation timestamp.
pub trait Timestamped {
    /// When the entity store first persisted this entity.
    fn created_at(&self) -> DateTime<Utc>;
}

/// A partial update applied field-by-field.
///
/// Every field of a patch is optional; applying a patch overwrites exactly
/// the present fields and clears nothing by omission. Applying the same
/// patch twice yields the same entity state as applying it once.
pub trait Patch<E> {
    /// Overwrite the entity's attributes with the present patch fields.
    fn apply(&self, entity: &mut E);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_are_lowercase() {
        assert_eq!(EntityKind::Store.to_string(), "store");
        assert_eq!(EntityKind::Review.to_string(), "review");
    }

    #[test]
    fn kind_serializes_to_snake_case() {
        let value = serde_json::to_value(EntityKind::Trainer).expect("serializes");
        assert_eq!(value, "trainer");
    }
}

//! Review aggregate: customer feedback attached to an order.
//!
//! A review records its author's account id, but the current access-control
//! routine does not enforce authorship on update or delete; see
//! [`crate::domain::ReviewService`] for the documented gap.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, EntityKind, Patch, Timestamped};
use crate::domain::AccountId;

/// Store-assigned numeric identifier for a [`Review`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ReviewId(i64);

impl ReviewId {
    /// Wrap a raw id as assigned by the entity store.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors returned by [`ReviewDraft::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewValidationError {
    /// The review content was empty or whitespace-only.
    #[error("review content must not be empty")]
    EmptyContent,
}

/// How long a review stays editable after creation.
///
/// Constructed explicitly and passed to the review service; there is no
/// ambient configuration registry. Deletion is not subject to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewPolicy {
    /// Length of the edit window, in days.
    pub edit_window_days: i64,
}

impl ReviewPolicy {
    /// Edit window as a [`Duration`].
    pub fn edit_window(self) -> Duration {
        Duration::days(self.edit_window_days)
    }
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            edit_window_days: 7,
        }
    }
}

/// A customer review for an order.
///
/// ## Invariants
/// - `order_id` and `author_account_id` are set at construction and never
///   reassigned.
/// - After the edit window closes the content is immutable to updates;
///   deletion remains possible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    id: ReviewId,
    order_id: i64,
    content: String,
    author_account_id: Option<AccountId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated payload for creating a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    order_id: i64,
    content: String,
    author_account_id: Option<AccountId>,
}

impl ReviewDraft {
    /// Validate and construct a draft for the given order.
    pub fn new(
        order_id: i64,
        content: impl Into<String>,
        author_account_id: Option<AccountId>,
    ) -> Result<Self, ReviewValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ReviewValidationError::EmptyContent);
        }
        Ok(Self {
            order_id,
            content,
            author_account_id,
        })
    }
}

/// Partial update for a review; absent fields leave the attribute unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPatch {
    /// Replacement content, when present.
    pub content: Option<String>,
}

impl Review {
    /// Construct a not-yet-persisted review.
    pub fn new(draft: ReviewDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: ReviewId::new(0),
            order_id: draft.order_id,
            content: draft.content,
            author_account_id: draft.author_account_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Review id.
    pub fn id(&self) -> ReviewId {
        self.id
    }

    /// Order this review belongs to.
    pub fn order_id(&self) -> i64 {
        self.order_id
    }

    /// Review body.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Account id of the author, when recorded. Present in data but not
    /// consulted by the access-control routine.
    pub fn author_account_id(&self) -> Option<&AccountId> {
        self.author_account_id.as_ref()
    }

    /// When the review was last persisted.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for Review {
    const KIND: EntityKind = EntityKind::Review;

    fn raw_id(&self) -> i64 {
        self.id.get()
    }

    fn assign_id(&mut self, id: i64) {
        self.id = ReviewId::new(id);
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Timestamped for Review {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Patch<Review> for ReviewPatch {
    fn apply(&self, entity: &mut Review) {
        if let Some(content) = &self.content {
            entity.content = content.clone();
        }
    }
}

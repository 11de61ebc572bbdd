//! Review domain service.
//!
//! Updates are fenced by the edit window in [`ReviewPolicy`]: once a review
//! is older than the window, its content is immutable regardless of caller.
//! Deletion ignores the window.
//!
//! Known gap, reproduced deliberately: create, update, and delete perform
//! NO author check even though the review records its author's account id.
//! This matches the behaviour of the system being replaced; do not add the
//! check here without confirming intent with the system owner.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::guard::{
    ensure_editable, map_repository_error, require_found, sorted_by_creation,
};
use crate::domain::ports::{EntityRepository, OrderScopedQuery};
use crate::domain::review::{Review, ReviewDraft, ReviewId, ReviewPatch, ReviewPolicy};
use crate::domain::{Error, Patch};

/// Service for creating, editing, and listing reviews.
#[derive(Clone)]
pub struct ReviewService<R> {
    reviews: Arc<R>,
    policy: ReviewPolicy,
    clock: Arc<dyn Clock>,
}

impl<R> ReviewService<R> {
    /// Create a new service with its repository, edit-window policy, and
    /// clock.
    pub fn new(reviews: Arc<R>, policy: ReviewPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            reviews,
            policy,
            clock,
        }
    }
}

impl<R> ReviewService<R>
where
    R: EntityRepository<Review> + OrderScopedQuery<Review>,
{
    /// Create a review for an order. No ownership check (see module docs).
    pub async fn create(&self, draft: ReviewDraft) -> Result<Review, Error> {
        let review = Review::new(draft, self.clock.utc());
        let saved = self
            .reviews
            .save(&review)
            .await
            .map_err(map_repository_error)?;
        tracing::info!(review_id = %saved.id(), order_id = saved.order_id(), "review created");
        Ok(saved)
    }

    /// Update a review's content.
    ///
    /// Fails `ModificationPeriodExpired` when the review is older than the
    /// edit window; the check runs before any mutation and does not depend
    /// on caller identity. No author check (see module docs).
    pub async fn update(&self, id: ReviewId, patch: &ReviewPatch) -> Result<Review, Error> {
        let mut review = require_found(
            self.reviews
                .find_by_id(id.get())
                .await
                .map_err(map_repository_error)?,
            id.get(),
        )?;
        ensure_editable(&review, self.clock.utc(), self.policy.edit_window())?;
        patch.apply(&mut review);
        self.reviews
            .save(&review)
            .await
            .map_err(map_repository_error)
    }

    /// Permanently delete a review.
    ///
    /// Not subject to the edit window, and currently not subject to any
    /// author check either (see module docs).
    pub async fn delete(&self, id: ReviewId) -> Result<(), Error> {
        let review = require_found(
            self.reviews
                .find_by_id(id.get())
                .await
                .map_err(map_repository_error)?,
            id.get(),
        )?;
        self.reviews
            .delete(&review)
            .await
            .map_err(map_repository_error)
    }

    /// List every review for an order, sorted ascending by creation time.
    pub async fn find_all_by_order(&self, order_id: i64) -> Result<Vec<Review>, Error> {
        let reviews = self
            .reviews
            .find_all_by_order(order_id)
            .await
            .map_err(map_repository_error)?;
        Ok(sorted_by_creation(reviews))
    }
}

#[cfg(test)]
#[path = "review_service_tests.rs"]
mod tests;

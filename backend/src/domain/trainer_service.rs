//! Trainer read service: listings and detail reads, no mutations yet.

use std::sync::Arc;

use crate::domain::guard::{map_repository_error, require_found, sorted_by_creation};
use crate::domain::ports::EntityRepository;
use crate::domain::trainer::{Trainer, TrainerId, TrainerSummary};
use crate::domain::Error;

/// Read-only service over trainer records.
#[derive(Clone)]
pub struct TrainerService<R> {
    trainers: Arc<R>,
}

impl<R> TrainerService<R> {
    /// Create a new service with the trainer repository.
    pub fn new(trainers: Arc<R>) -> Self {
        Self { trainers }
    }
}

impl<R> TrainerService<R>
where
    R: EntityRepository<Trainer>,
{
    /// List every trainer as a summary, sorted ascending by creation time.
    pub async fn find_all(&self) -> Result<Vec<TrainerSummary>, Error> {
        let trainers = self
            .trainers
            .find_all()
            .await
            .map_err(map_repository_error)?;
        Ok(sorted_by_creation(trainers)
            .iter()
            .map(TrainerSummary::from)
            .collect())
    }

    /// Detail read of one trainer.
    pub async fn find_by_id(&self, id: TrainerId) -> Result<Trainer, Error> {
        let found = self
            .trainers
            .find_by_id(id.get())
            .await
            .map_err(map_repository_error)?;
        require_found(found, id.get())
    }
}

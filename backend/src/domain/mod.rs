//! Domain entities, guarded mutations, and services.
//!
//! The guarded-mutation core in [`guard`] standardises the
//! fetch → authorize → mutate → persist sequence every write follows; the
//! per-entity services are thin specializations of it. Driven ports live in
//! [`ports`]; adapters for durable storage and inbound transports are
//! outside this crate.

pub mod account;
pub mod entity;
pub mod error;
pub mod guard;
pub mod owner;
pub mod ports;
pub mod review;
pub mod review_service;
pub mod store;
pub mod store_service;
pub mod trainer;
pub mod trainer_service;
pub mod user;
pub mod user_service;

pub use self::account::{AccountId, AccountIdValidationError};
pub use self::entity::{Entity, EntityKind, OwnedEntity, Patch, Timestamped};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::owner::{Owner, OwnerId};
pub use self::review::{
    Review, ReviewDraft, ReviewId, ReviewPatch, ReviewPolicy, ReviewValidationError,
};
pub use self::review_service::ReviewService;
pub use self::store::{
    Store, StoreDraft, StoreId, StorePatch, StoreSummary, StoreValidationError,
};
pub use self::store_service::StoreService;
pub use self::trainer::{Trainer, TrainerId, TrainerSummary};
pub use self::trainer_service::TrainerService;
pub use self::user::{User, UserDraft, UserId, UserProfile, UserRole, UserValidationError};
pub use self::user_service::UserService;

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, Error>;

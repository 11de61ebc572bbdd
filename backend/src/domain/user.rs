//! User aggregate: a registered member account.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, EntityKind, Timestamped};
use crate::domain::AccountId;

/// Store-assigned numeric identifier for a [`User`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw id as assigned by the entity store.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role a user account holds within the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular gym member.
    Member,
    /// Store-owning account.
    Owner,
    /// Trainer account.
    Trainer,
}

/// Validation errors returned by [`UserDraft::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The username was empty or whitespace-only.
    #[error("username must not be empty")]
    EmptyUsername,
    /// The email address had no `@` separator.
    #[error("email address must contain '@'")]
    InvalidEmail,
}

/// A registered member account.
///
/// ## Invariants
/// - `account_id`, `username`, and `email` are unique across users; the
///   registration service enforces this before saving.
/// - `deleted_at` marks a soft-deleted account; deactivated users are
///   invisible to profile reads but their row remains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    account_id: AccountId,
    username: String,
    email: String,
    phone_number: String,
    display_name: String,
    role: UserRole,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Validated payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    account_id: AccountId,
    username: String,
    email: String,
    phone_number: String,
    display_name: String,
    role: UserRole,
}

impl UserDraft {
    /// Validate and construct a registration payload.
    pub fn new(
        account_id: AccountId,
        username: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        display_name: impl Into<String>,
        role: UserRole,
    ) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        let email = email.into();
        if !email.contains('@') {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self {
            account_id,
            username,
            email,
            phone_number: phone_number.into(),
            display_name: display_name.into(),
            role,
        })
    }

    /// Username requested at registration.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Email requested at registration.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Read projection of a user's public profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Account identifier.
    pub account_id: AccountId,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone_number: String,
    /// Display name.
    pub display_name: String,
}

impl User {
    /// Construct a not-yet-persisted user from a validated draft.
    pub fn new(draft: UserDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(0),
            account_id: draft.account_id,
            username: draft.username,
            email: draft.email,
            phone_number: draft.phone_number,
            display_name: draft.display_name,
            role: draft.role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// User id.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Account identifier.
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Account role.
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// When the account was soft-deleted, if it was.
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// True when the account has been deactivated.
    pub fn is_deactivated(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Soft-delete the account at `now`. Idempotent: the first deactivation
    /// timestamp is kept.
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(now);
        }
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn raw_id(&self) -> i64 {
        self.id.get()
    }

    fn assign_id(&mut self, id: i64) {
        self.id = UserId::new(id);
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Timestamped for User {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            account_id: user.account_id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            display_name: user.display_name.clone(),
        }
    }
}

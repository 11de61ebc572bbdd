//! Port for resolving the calling principal.

use crate::domain::AccountId;

/// Resolves the caller's account identifier from the ambient request.
///
/// Inbound adapters implement this over their session or token machinery;
/// the domain only sees the opaque account id, or `None` for anonymous
/// callers.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityContext: Send + Sync {
    /// Account id of the current caller, when authenticated.
    fn current_account_id(&self) -> Option<AccountId>;
}

/// Identity context for anonymous callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnonymousIdentity;

impl IdentityContext for AnonymousIdentity {
    fn current_account_id(&self) -> Option<AccountId> {
        None
    }
}

/// Identity context pinned to one account, for tests and tooling.
#[derive(Debug, Clone)]
pub struct StaticIdentity(AccountId);

impl StaticIdentity {
    /// Pin the context to `account_id`.
    pub fn new(account_id: AccountId) -> Self {
        Self(account_id)
    }
}

impl IdentityContext for StaticIdentity {
    fn current_account_id(&self) -> Option<AccountId> {
        Some(self.0.clone())
    }
}

//! User registration and profile service.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;

use crate::domain::guard::map_repository_error;
use crate::domain::ports::{EntityRepository, IdentityContext, UserQueries};
use crate::domain::user::{User, UserDraft, UserProfile};
use crate::domain::{AccountId, Error};

/// Service for registering users and reading profiles.
#[derive(Clone)]
pub struct UserService<R, I> {
    users: Arc<R>,
    identity: Arc<I>,
    clock: Arc<dyn Clock>,
}

impl<R, I> UserService<R, I> {
    /// Create a new service with its repository, identity context, and
    /// clock.
    pub fn new(users: Arc<R>, identity: Arc<I>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            identity,
            clock,
        }
    }
}

impl<R, I> UserService<R, I>
where
    R: EntityRepository<User> + UserQueries,
    I: IdentityContext,
{
    /// Register a new user.
    ///
    /// Fails `Conflict` when the username or email is already taken;
    /// soft-deleted accounts still reserve their username and email.
    pub async fn register(&self, draft: UserDraft) -> Result<User, Error> {
        if self
            .users
            .find_by_username(draft.username())
            .await
            .map_err(map_repository_error)?
            .is_some()
        {
            return Err(Error::conflict("username is already taken")
                .with_details(json!({ "code": "duplicate_username" })));
        }
        if self
            .users
            .find_by_email(draft.email())
            .await
            .map_err(map_repository_error)?
            .is_some()
        {
            return Err(Error::conflict("email is already registered")
                .with_details(json!({ "code": "duplicate_email" })));
        }

        let user = User::new(draft, self.clock.utc());
        let saved = self.users.save(&user).await.map_err(map_repository_error)?;
        tracing::info!(user_id = %saved.id(), "user registered");
        Ok(saved)
    }

    /// Read a user's public profile.
    ///
    /// Soft-deleted accounts read as `NotFound`.
    pub async fn profile(&self, account_id: &AccountId) -> Result<UserProfile, Error> {
        let user = self
            .users
            .find_by_account_id(account_id)
            .await
            .map_err(map_repository_error)?
            .filter(|user| !user.is_deactivated())
            .ok_or_else(|| Error::not_found(format!("user {account_id} does not exist")))?;
        Ok(UserProfile::from(&user))
    }

    /// Soft-delete the caller's own account.
    ///
    /// Fails `Forbidden` when the caller is anonymous or targets another
    /// account; `NotFound` when no user record exists for the caller.
    pub async fn deactivate(&self, account_id: &AccountId) -> Result<(), Error> {
        let caller = self.identity.current_account_id();
        if caller.as_ref() != Some(account_id) {
            return Err(Error::forbidden("accounts can only be deactivated by their holder"));
        }

        let mut user = self
            .users
            .find_by_account_id(account_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {account_id} does not exist")))?;
        user.deactivate(self.clock.utc());
        self.users.save(&user).await.map_err(map_repository_error)?;
        tracing::info!(user_id = %user.id(), "user deactivated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use mockable::DefaultClock;
    use mockall::mock;

    use super::UserService;
    use crate::domain::ports::{
        EntityRepository, MockIdentityContext, RepositoryError, UserQueries,
    };
    use crate::domain::user::{User, UserDraft, UserRole};
    use crate::domain::{AccountId, Entity, ErrorCode};
    use chrono::Utc;

    mock! {
        pub UserRepo {}

        #[async_trait]
        impl EntityRepository<User> for UserRepo {
            async fn save(&self, entity: &User) -> Result<User, RepositoryError>;
            async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;
            async fn find_all(&self) -> Result<Vec<User>, RepositoryError>;
            async fn delete(&self, entity: &User) -> Result<(), RepositoryError>;
        }

        #[async_trait]
        impl UserQueries for UserRepo {
            async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
            async fn find_by_account_id(&self, account_id: &AccountId) -> Result<Option<User>, RepositoryError>;
        }
    }

    fn account(raw: &str) -> AccountId {
        AccountId::new(raw).expect("valid account id")
    }

    fn draft(raw: &str) -> UserDraft {
        UserDraft::new(
            account(raw),
            "member1",
            "member1@example.com",
            "010-0000-0000",
            "Member One",
            UserRole::Member,
        )
        .expect("valid draft")
    }

    fn existing_user(raw: &str) -> User {
        let mut user = User::new(draft(raw), Utc::now());
        user.assign_id(1);
        user
    }

    fn identity_for(raw: &str) -> MockIdentityContext {
        let account_id = account(raw);
        let mut identity = MockIdentityContext::new();
        identity
            .expect_current_account_id()
            .returning(move || Some(account_id.clone()));
        identity
    }

    fn make_service(
        repo: MockUserRepo,
        identity: MockIdentityContext,
    ) -> UserService<MockUserRepo, MockIdentityContext> {
        UserService::new(Arc::new(repo), Arc::new(identity), Arc::new(DefaultClock))
    }

    #[tokio::test]
    async fn register_saves_a_fresh_user() {
        let mut repo = MockUserRepo::new();
        repo.expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_find_by_email().times(1).return_once(|_| Ok(None));
        repo.expect_save().times(1).return_once(|user| {
            let mut saved = user.clone();
            saved.assign_id(1);
            Ok(saved)
        });

        let service = make_service(repo, MockIdentityContext::new());
        let user = service
            .register(draft("member1"))
            .await
            .expect("registration succeeds");
        assert_eq!(user.username(), "member1");
        assert!(!user.is_deactivated());
    }

    #[tokio::test]
    async fn register_rejects_duplicate_username() {
        let mut repo = MockUserRepo::new();
        repo.expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(Some(existing_user("other"))));
        repo.expect_find_by_email().times(0);
        repo.expect_save().times(0);

        let service = make_service(repo, MockIdentityContext::new());
        let err = service
            .register(draft("member1"))
            .await
            .expect_err("conflict");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(
            err.details().and_then(|d| d["code"].as_str()),
            Some("duplicate_username"),
        );
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let mut repo = MockUserRepo::new();
        repo.expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(Some(existing_user("other"))));
        repo.expect_save().times(0);

        let service = make_service(repo, MockIdentityContext::new());
        let err = service
            .register(draft("member1"))
            .await
            .expect_err("conflict");
        assert_eq!(
            err.details().and_then(|d| d["code"].as_str()),
            Some("duplicate_email"),
        );
    }

    #[tokio::test]
    async fn profile_hides_soft_deleted_accounts() {
        let mut deactivated = existing_user("member1");
        deactivated.deactivate(Utc::now());
        let mut repo = MockUserRepo::new();
        repo.expect_find_by_account_id()
            .times(1)
            .return_once(move |_| Ok(Some(deactivated)));

        let service = make_service(repo, MockIdentityContext::new());
        let err = service
            .profile(&account("member1"))
            .await
            .expect_err("not found");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn deactivate_requires_the_account_holder() {
        let mut repo = MockUserRepo::new();
        repo.expect_find_by_account_id().times(0);
        repo.expect_save().times(0);

        let service = make_service(repo, identity_for("member2"));
        let err = service
            .deactivate(&account("member1"))
            .await
            .expect_err("forbidden");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn deactivate_marks_the_callers_account() {
        let mut repo = MockUserRepo::new();
        repo.expect_find_by_account_id()
            .times(1)
            .return_once(|_| Ok(Some(existing_user("member1"))));
        repo.expect_save()
            .withf(|user: &User| user.is_deactivated())
            .times(1)
            .return_once(|user| Ok(user.clone()));

        let service = make_service(repo, identity_for("member1"));
        service
            .deactivate(&account("member1"))
            .await
            .expect("deactivation succeeds");
    }
}

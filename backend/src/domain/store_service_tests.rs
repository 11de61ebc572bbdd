//! Unit tests for the store service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use mockable::DefaultClock;
use mockall::mock;
use mockall::predicate::eq;

use super::StoreService;
use crate::domain::ports::{
    EntityRepository, MockIdentityContext, MockOwnerQueries, OwnerScopedQuery, RepositoryError,
};
use crate::domain::store::{Store, StoreDraft, StoreId, StorePatch, StoreSummary};
use crate::domain::{AccountId, Entity, ErrorCode, Owner, OwnedEntity};

mock! {
    pub StoreRepo {}

    #[async_trait]
    impl EntityRepository<Store> for StoreRepo {
        async fn save(&self, entity: &Store) -> Result<Store, RepositoryError>;
        async fn find_by_id(&self, id: i64) -> Result<Option<Store>, RepositoryError>;
        async fn find_all(&self) -> Result<Vec<Store>, RepositoryError>;
        async fn delete(&self, entity: &Store) -> Result<(), RepositoryError>;
    }

    #[async_trait]
    impl OwnerScopedQuery<Store> for StoreRepo {
        async fn find_all_by_owner(&self, owner: &AccountId) -> Result<Vec<Store>, RepositoryError>;
    }
}

fn account(raw: &str) -> AccountId {
    AccountId::new(raw).expect("valid account id")
}

fn identity_for(raw: &str) -> MockIdentityContext {
    let account_id = account(raw);
    let mut identity = MockIdentityContext::new();
    identity
        .expect_current_account_id()
        .returning(move || Some(account_id.clone()));
    identity
}

fn anonymous_identity() -> MockIdentityContext {
    let mut identity = MockIdentityContext::new();
    identity.expect_current_account_id().returning(|| None);
    identity
}

fn owner_record(raw: &str) -> Owner {
    let mut owner = Owner::new(account(raw), "Owner One", Utc::now());
    owner.assign_id(1);
    owner
}

fn store_owned_by(raw: &str, id: i64) -> Store {
    let draft =
        StoreDraft::new("Iron Temple", "strength gym", "12 High St").expect("valid draft");
    let mut store = Store::new(draft, account(raw), Utc::now());
    store.assign_id(id);
    store
}

fn make_service(
    repo: MockStoreRepo,
    owners: MockOwnerQueries,
    identity: MockIdentityContext,
) -> StoreService<MockStoreRepo, MockOwnerQueries, MockIdentityContext> {
    StoreService::new(
        Arc::new(repo),
        Arc::new(owners),
        Arc::new(identity),
        Arc::new(DefaultClock),
    )
}

#[tokio::test]
async fn create_persists_store_for_resolvable_owner() {
    let mut repo = MockStoreRepo::new();
    repo.expect_save().times(1).return_once(|store| {
        let mut saved = store.clone();
        saved.assign_id(10);
        Ok(saved)
    });
    let mut owners = MockOwnerQueries::new();
    owners
        .expect_find_by_account_id()
        .with(eq(account("owner1")))
        .times(1)
        .return_once(|_| Ok(Some(owner_record("owner1"))));

    let service = make_service(repo, owners, identity_for("owner1"));
    let draft = StoreDraft::new("Iron Temple", "strength gym", "12 High St")
        .expect("valid draft");

    let store = service.create(draft).await.expect("create succeeds");
    assert_eq!(store.id(), StoreId::new(10));
    assert_eq!(store.owner_account_id(), &account("owner1"));
}

#[tokio::test]
async fn create_rejects_anonymous_caller_before_persistence() {
    let mut repo = MockStoreRepo::new();
    repo.expect_save().times(0);
    let mut owners = MockOwnerQueries::new();
    owners.expect_find_by_account_id().times(0);

    let service = make_service(repo, owners, anonymous_identity());
    let draft = StoreDraft::new("Iron Temple", "", "").expect("valid draft");

    let err = service.create(draft).await.expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn create_rejects_caller_without_owner_record() {
    let mut repo = MockStoreRepo::new();
    repo.expect_save().times(0);
    let mut owners = MockOwnerQueries::new();
    owners
        .expect_find_by_account_id()
        .times(1)
        .return_once(|_| Ok(None));

    let service = make_service(repo, owners, identity_for("member1"));
    let draft = StoreDraft::new("Iron Temple", "", "").expect("valid draft");

    let err = service.create(draft).await.expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn update_applies_patch_for_the_owner() {
    let mut repo = MockStoreRepo::new();
    repo.expect_find_by_id()
        .with(eq(7_i64))
        .times(1)
        .return_once(|_| Ok(Some(store_owned_by("owner1", 7))));
    repo.expect_save()
        .withf(|store: &Store| store.name() == "NewName" && store.description() == "strength gym")
        .times(1)
        .return_once(|store| Ok(store.clone()));

    let service = make_service(repo, MockOwnerQueries::new(), identity_for("owner1"));
    let patch = StorePatch {
        name: Some("NewName".into()),
        ..StorePatch::default()
    };

    let updated = service
        .update(StoreId::new(7), &patch)
        .await
        .expect("update succeeds");
    assert_eq!(updated.name(), "NewName");
    assert_eq!(updated.address(), "12 High St");
}

#[tokio::test]
async fn update_rejects_non_owner_without_saving() {
    let mut repo = MockStoreRepo::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(store_owned_by("owner1", 7))));
    repo.expect_save().times(0);

    let service = make_service(repo, MockOwnerQueries::new(), identity_for("owner2"));
    let patch = StorePatch {
        name: Some("Hijacked".into()),
        ..StorePatch::default()
    };

    let err = service
        .update(StoreId::new(7), &patch)
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn update_of_missing_store_is_not_found() {
    let mut repo = MockStoreRepo::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_save().times(0);

    let service = make_service(repo, MockOwnerQueries::new(), identity_for("owner1"));

    let err = service
        .update(StoreId::new(9999), &StorePatch::default())
        .await
        .expect_err("not found");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_removes_the_store_for_its_owner() {
    let mut repo = MockStoreRepo::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(store_owned_by("owner1", 7))));
    repo.expect_delete()
        .withf(|store: &Store| store.id() == StoreId::new(7))
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(repo, MockOwnerQueries::new(), identity_for("owner1"));
    service
        .delete(StoreId::new(7))
        .await
        .expect("delete succeeds");
}

#[tokio::test]
async fn delete_of_missing_store_is_not_found() {
    let mut repo = MockStoreRepo::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_delete().times(0);

    let service = make_service(repo, MockOwnerQueries::new(), identity_for("owner1"));

    let err = service
        .delete(StoreId::new(9999))
        .await
        .expect_err("not found");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn find_all_sorts_summaries_by_creation_time() {
    let base = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).single().expect("valid date");
    let mut newest = Store::new(
        StoreDraft::new("Newest", "", "").expect("valid draft"),
        account("owner1"),
        base + Duration::days(1),
    );
    newest.assign_id(2);
    let mut oldest = Store::new(
        StoreDraft::new("Oldest", "", "").expect("valid draft"),
        account("owner1"),
        base,
    );
    oldest.assign_id(1);

    let mut repo = MockStoreRepo::new();
    let listing = vec![newest, oldest];
    repo.expect_find_all().times(1).return_once(move || Ok(listing));

    let service = make_service(repo, MockOwnerQueries::new(), anonymous_identity());
    let summaries = service.find_all().await.expect("listing succeeds");

    assert_eq!(
        summaries,
        vec![
            StoreSummary {
                id: StoreId::new(1),
                name: "Oldest".into(),
            },
            StoreSummary {
                id: StoreId::new(2),
                name: "Newest".into(),
            },
        ],
    );
}

#[tokio::test]
async fn find_by_id_is_public() {
    let mut repo = MockStoreRepo::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(store_owned_by("owner1", 7))));

    let service = make_service(repo, MockOwnerQueries::new(), anonymous_identity());
    let store = service
        .find_by_id(StoreId::new(7))
        .await
        .expect("public read succeeds");
    assert_eq!(store.id(), StoreId::new(7));
}

#[tokio::test]
async fn find_all_for_owner_scopes_to_the_caller() {
    let mut repo = MockStoreRepo::new();
    repo.expect_find_all_by_owner()
        .with(eq(account("owner1")))
        .times(1)
        .return_once(|_| Ok(vec![store_owned_by("owner1", 7)]));

    let service = make_service(repo, MockOwnerQueries::new(), identity_for("owner1"));
    let summaries = service
        .find_all_for_owner()
        .await
        .expect("scoped listing succeeds");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, StoreId::new(7));
}

#[tokio::test]
async fn find_for_owner_rejects_other_owners() {
    let mut repo = MockStoreRepo::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(store_owned_by("owner1", 7))));

    let service = make_service(repo, MockOwnerQueries::new(), identity_for("owner2"));
    let err = service
        .find_for_owner(StoreId::new(7))
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn repository_outage_surfaces_as_service_unavailable() {
    let mut repo = MockStoreRepo::new();
    repo.expect_find_all()
        .times(1)
        .return_once(|| Err(RepositoryError::connection("pool exhausted")));

    let service = make_service(repo, MockOwnerQueries::new(), anonymous_identity());
    let err = service.find_all().await.expect_err("unavailable");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

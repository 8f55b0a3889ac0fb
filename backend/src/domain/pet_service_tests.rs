//! Tests for the pet service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{MockPetRepository, MockUserRepository};
use crate::domain::{ErrorCode, LOGIN_REQUIRED, UserId, Username};

fn session(name: &str) -> SessionUser {
    SessionUser::new(UserId::random(), Username::new(name).expect("username"))
}

fn stored_pet(owner: &str) -> Pet {
    Pet::from_draft(
        PetId::random(),
        PetDraft::try_from_parts("Rex", Some(2), None, None).expect("draft"),
        Username::new(owner).expect("owner"),
    )
}

fn make_service(
    pets: MockPetRepository,
    users: MockUserRepository,
    ownership: OwnershipPolicy,
) -> PetService<MockPetRepository, MockUserRepository> {
    PetService::new(Arc::new(pets), Arc::new(users), ownership)
}

fn add_request(name: &str) -> AddPetRequest {
    AddPetRequest {
        name: name.to_owned(),
        age: Some(2),
        gender: None,
        breed: Some("Collie".to_owned()),
    }
}

fn update_request(pet_id: &PetId) -> UpdatePetRequest {
    UpdatePetRequest {
        pet_id: pet_id.to_string(),
        name: Some("Max".to_owned()),
        age: None,
        gender: None,
        breed: None,
    }
}

#[rstest]
#[tokio::test]
async fn add_pet_tags_owner_and_links_user() {
    let caller = session("alice");
    let caller_id = *caller.id();
    let mut pets = MockPetRepository::new();
    let mut users = MockUserRepository::new();
    pets.expect_create()
        .withf(|pet| pet.username.as_ref() == "alice" && pet.name == "Rex")
        .times(1)
        .return_once(|_| Ok(()));
    users
        .expect_push_pet()
        .withf(move |id, _| id == &caller_id)
        .times(1)
        .return_once(|_, _| Ok(()));

    let service = make_service(pets, users, OwnershipPolicy::Unchecked);
    let pet = service
        .add_pet(Some(&caller), add_request("Rex"))
        .await
        .expect("pet created");
    assert_eq!(pet.username.as_ref(), "alice");
    assert_eq!(pet.breed.as_deref(), Some("Collie"));
}

#[rstest]
#[tokio::test]
async fn add_pet_without_session_touches_nothing() {
    let mut pets = MockPetRepository::new();
    let mut users = MockUserRepository::new();
    pets.expect_create().never();
    users.expect_push_pet().never();

    let service = make_service(pets, users, OwnershipPolicy::Unchecked);
    let err = service
        .add_pet(None, add_request("Rex"))
        .await
        .expect_err("anonymous");
    assert_eq!(err.code(), ErrorCode::Unauthenticated);
    assert_eq!(err.message(), LOGIN_REQUIRED);
}

#[rstest]
#[tokio::test]
async fn anonymous_check_precedes_validation() {
    let service = make_service(
        MockPetRepository::new(),
        MockUserRepository::new(),
        OwnershipPolicy::Unchecked,
    );
    let err = service
        .add_pet(None, add_request(""))
        .await
        .expect_err("anonymous");
    assert_eq!(err.code(), ErrorCode::Unauthenticated);
}

#[rstest]
#[tokio::test]
async fn update_pet_rejects_malformed_id() {
    let mut pets = MockPetRepository::new();
    pets.expect_update().never();
    let service = make_service(pets, MockUserRepository::new(), OwnershipPolicy::Unchecked);

    let mut request = update_request(&PetId::random());
    request.pet_id = "42".to_owned();
    let err = service
        .update_pet(Some(&session("alice")), request)
        .await
        .expect_err("malformed id");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn unchecked_policy_lets_anyone_update() {
    let pet = stored_pet("alice");
    let pet_id = pet.id;
    let mut pets = MockPetRepository::new();
    pets.expect_find_by_id().never();
    pets.expect_update()
        .withf(move |id, changes| id == &pet_id && changes.name.as_deref() == Some("Max"))
        .return_once(move |_, _| {
            let mut updated = pet;
            updated.name = "Max".to_owned();
            Ok(Some(updated))
        });

    let service = make_service(pets, MockUserRepository::new(), OwnershipPolicy::Unchecked);
    let updated = service
        .update_pet(Some(&session("mallory")), update_request(&pet_id))
        .await
        .expect("update succeeds")
        .expect("pet exists");
    assert_eq!(updated.name, "Max");
    assert_eq!(updated.username.as_ref(), "alice");
}

#[rstest]
#[tokio::test]
async fn enforced_policy_forbids_foreign_update() {
    let pet = stored_pet("alice");
    let pet_id = pet.id;
    let mut pets = MockPetRepository::new();
    pets.expect_find_by_id().return_once(move |_| Ok(Some(pet)));
    pets.expect_update().never();

    let service = make_service(pets, MockUserRepository::new(), OwnershipPolicy::Enforced);
    let err = service
        .update_pet(Some(&session("mallory")), update_request(&pet_id))
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn update_missing_pet_resolves_to_none() {
    let mut pets = MockPetRepository::new();
    pets.expect_update().return_once(|_, _| Ok(None));

    let service = make_service(pets, MockUserRepository::new(), OwnershipPolicy::Unchecked);
    let result = service
        .update_pet(Some(&session("alice")), update_request(&PetId::random()))
        .await
        .expect("no error");
    assert!(result.is_none());
}

#[rstest]
#[tokio::test]
async fn delete_pet_pulls_owner_reference() {
    let pet = stored_pet("alice");
    let pet_id = pet.id;
    let mut pets = MockPetRepository::new();
    let mut users = MockUserRepository::new();
    pets.expect_delete().return_once(move |_| Ok(Some(pet)));
    users
        .expect_pull_pet()
        .withf(move |id| id == &pet_id)
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(pets, users, OwnershipPolicy::Unchecked);
    let deleted = service
        .delete_pet(Some(&session("alice")), &pet_id.to_string())
        .await
        .expect("delete succeeds");
    assert_eq!(deleted.map(|pet| pet.id), Some(pet_id));
}

#[rstest]
#[tokio::test]
async fn delete_missing_pet_skips_user_update() {
    let mut pets = MockPetRepository::new();
    let mut users = MockUserRepository::new();
    pets.expect_delete().return_once(|_| Ok(None));
    users.expect_pull_pet().never();

    let service = make_service(pets, users, OwnershipPolicy::Unchecked);
    let result = service
        .delete_pet(Some(&session("alice")), &PetId::random().to_string())
        .await
        .expect("no error");
    assert!(result.is_none());
}

#[rstest]
#[case::update(true)]
#[case::delete(false)]
#[tokio::test]
async fn anonymous_edits_touch_nothing(#[case] update: bool) {
    let mut pets = MockPetRepository::new();
    let mut users = MockUserRepository::new();
    pets.expect_find_by_id().never();
    pets.expect_update().never();
    pets.expect_delete().never();
    users.expect_pull_pet().never();

    let service = make_service(pets, users, OwnershipPolicy::Enforced);
    let pet_id = PetId::random();
    let err = if update {
        service
            .update_pet(None, update_request(&pet_id))
            .await
            .expect_err("anonymous update")
    } else {
        service
            .delete_pet(None, &pet_id.to_string())
            .await
            .expect_err("anonymous delete")
    };
    assert_eq!(err.code(), ErrorCode::Unauthenticated);
    assert_eq!(err.message(), LOGIN_REQUIRED);
}

#[rstest]
#[tokio::test]
async fn unchecked_policy_lets_anyone_delete() {
    let pet = stored_pet("alice");
    let pet_id = pet.id;
    let mut pets = MockPetRepository::new();
    let mut users = MockUserRepository::new();
    pets.expect_find_by_id().never();
    pets.expect_delete()
        .withf(move |id| id == &pet_id)
        .times(1)
        .return_once(move |_| Ok(Some(pet)));
    users
        .expect_pull_pet()
        .withf(move |id| id == &pet_id)
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(pets, users, OwnershipPolicy::Unchecked);
    let deleted = service
        .delete_pet(Some(&session("mallory")), &pet_id.to_string())
        .await
        .expect("delete succeeds")
        .expect("pet existed");
    assert_eq!(deleted.username.as_ref(), "alice");
}

#[rstest]
#[tokio::test]
async fn enforced_policy_forbids_foreign_delete() {
    let pet = stored_pet("alice");
    let pet_id = pet.id;
    let mut pets = MockPetRepository::new();
    let mut users = MockUserRepository::new();
    pets.expect_find_by_id().return_once(move |_| Ok(Some(pet)));
    pets.expect_delete().never();
    users.expect_pull_pet().never();

    let service = make_service(pets, users, OwnershipPolicy::Enforced);
    let err = service
        .delete_pet(Some(&session("mallory")), &pet_id.to_string())
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

/// `listed` is the owner passed to the store, or `None` when the filter
/// cannot match and the store is never consulted.
#[rstest]
#[case::absent(None, Some(None))]
#[case::empty(Some(""), Some(None))]
#[case::exact(Some("alice"), Some(Some("alice")))]
#[case::padded(Some(" alice "), None)]
#[case::whitespace_only(Some("   "), None)]
#[tokio::test]
async fn pets_filter_by_exact_owner(
    #[case] filter: Option<&'static str>,
    #[case] listed: Option<Option<&'static str>>,
) {
    let mut pets = MockPetRepository::new();
    match listed {
        Some(expected) => {
            pets.expect_list()
                .withf(move |owner| owner.as_ref().map(ToString::to_string).as_deref() == expected)
                .times(1)
                .return_once(|_| Ok(vec![stored_pet("alice")]));
        }
        None => {
            pets.expect_list().never();
        }
    }

    let service = make_service(pets, MockUserRepository::new(), OwnershipPolicy::Unchecked);
    let found = service.pets(filter).await.expect("list succeeds");
    assert_eq!(found.is_empty(), listed.is_none());
}

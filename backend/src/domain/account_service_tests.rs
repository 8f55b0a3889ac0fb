//! Tests for the account service.

use std::sync::Arc;

use rstest::{fixture, rstest};
use zeroize::Zeroizing;

use super::*;
use crate::domain::ports::{
    MockPasswordHasher, MockPetRepository, MockStatusRepository, MockTokenIssuer,
    MockUserRepository, UserPersistenceError,
};
use crate::domain::{Email, ErrorCode, Pet, PetDraft, PetId, Username};

type TestService = AccountService<MockUserRepository, MockPetRepository, MockStatusRepository>;

struct Mocks {
    users: MockUserRepository,
    pets: MockPetRepository,
    statuses: MockStatusRepository,
    hasher: MockPasswordHasher,
    tokens: MockTokenIssuer,
}

impl Mocks {
    fn into_service(self) -> TestService {
        AccountService::new(
            Arc::new(self.users),
            Arc::new(self.pets),
            Arc::new(self.statuses),
            Arc::new(self.hasher),
            Arc::new(self.tokens),
        )
    }
}

#[fixture]
fn mocks() -> Mocks {
    Mocks {
        users: MockUserRepository::new(),
        pets: MockPetRepository::new(),
        statuses: MockStatusRepository::new(),
        hasher: MockPasswordHasher::new(),
        tokens: MockTokenIssuer::new(),
    }
}

fn stored_user() -> User {
    User::new(
        UserId::random(),
        Username::new("rex").expect("username"),
        Email::new("rex@example.com").expect("email"),
        PasswordHash::from_encoded("stored-hash"),
    )
}

fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_owned(),
        password: Zeroizing::new(password.to_owned()),
    }
}

#[rstest]
#[tokio::test]
async fn register_hashes_password_and_issues_token(mut mocks: Mocks) {
    mocks
        .hasher
        .expect_hash()
        .withf(|password| password == "woofwoof")
        .times(1)
        .return_once(|_| Ok(PasswordHash::from_encoded("hashed")));
    mocks
        .users
        .expect_create()
        .withf(|user| user.email().as_ref() == "rex@example.com" && user.password_hash().as_str() == "hashed")
        .times(1)
        .return_once(|_| Ok(()));
    mocks
        .tokens
        .expect_issue()
        .times(1)
        .return_once(|_| Ok("signed".to_owned()));

    let payload = mocks
        .into_service()
        .register(RegisterRequest {
            username: "rex".to_owned(),
            email: "Rex@Example.com".to_owned(),
            password: Zeroizing::new("woofwoof".to_owned()),
        })
        .await
        .expect("registration succeeds");

    assert_eq!(payload.token, "signed");
    assert_eq!(payload.user.username().as_ref(), "rex");
}

#[rstest]
#[tokio::test]
async fn register_rejects_short_password_before_hashing(mut mocks: Mocks) {
    mocks.hasher.expect_hash().never();
    mocks.users.expect_create().never();

    let err = mocks
        .into_service()
        .register(RegisterRequest {
            username: "rex".to_owned(),
            email: "rex@example.com".to_owned(),
            password: Zeroizing::new("abc".to_owned()),
        })
        .await
        .expect_err("short password");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.details(), Some(&serde_json::json!({ "field": "password" })));
}

#[rstest]
#[tokio::test]
async fn register_reports_taken_email_as_conflict(mut mocks: Mocks) {
    mocks
        .hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::from_encoded("hashed")));
    mocks
        .users
        .expect_create()
        .return_once(|_| Err(UserPersistenceError::duplicate("email")));
    mocks.tokens.expect_issue().never();

    let err = mocks
        .into_service()
        .register(RegisterRequest {
            username: "rex".to_owned(),
            email: "rex@example.com".to_owned(),
            password: Zeroizing::new("woofwoof".to_owned()),
        })
        .await
        .expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn login_with_unknown_email_still_verifies_a_hash(mut mocks: Mocks) {
    mocks.users.expect_find_by_email().return_once(|_| Ok(None));
    mocks
        .hasher
        .expect_verify()
        .withf(|_, hash| hash.as_str() == DUMMY_PASSWORD_HASH)
        .times(1)
        .return_once(|_, _| Ok(false));
    mocks.tokens.expect_issue().never();

    let err = mocks
        .into_service()
        .login(login_request("ghost@example.com", "whatever"))
        .await
        .expect_err("unknown email");

    assert_eq!(err.code(), ErrorCode::Unauthenticated);
    assert_eq!(err.message(), INCORRECT_CREDENTIALS);
}

#[rstest]
#[tokio::test]
async fn unknown_email_hides_a_failing_dummy_verification(mut mocks: Mocks) {
    mocks.users.expect_find_by_email().return_once(|_| Ok(None));
    mocks
        .hasher
        .expect_verify()
        .times(1)
        .return_once(|_, _| Err(Error::internal("hash parse failed")));
    mocks.tokens.expect_issue().never();

    let err = mocks
        .into_service()
        .login(login_request("ghost@example.com", "whatever"))
        .await
        .expect_err("unknown email");

    assert_eq!(err.code(), ErrorCode::Unauthenticated);
    assert_eq!(err.message(), INCORRECT_CREDENTIALS);
}

#[rstest]
#[case::empty_email("", "woofwoof")]
#[case::blank_email("   ", "woofwoof")]
#[case::empty_password("rex@example.com", "")]
#[tokio::test]
async fn login_with_blank_credentials_is_incorrect(
    mut mocks: Mocks,
    #[case] email: &str,
    #[case] password: &str,
) {
    mocks.users.expect_find_by_email().never();
    mocks.hasher.expect_verify().never();
    mocks.tokens.expect_issue().never();

    let err = mocks
        .into_service()
        .login(login_request(email, password))
        .await
        .expect_err("blank credentials");

    assert_eq!(err.code(), ErrorCode::Unauthenticated);
    assert_eq!(err.message(), INCORRECT_CREDENTIALS);
    assert!(err.details().is_none());
}

#[rstest]
#[tokio::test]
async fn login_with_wrong_password_uses_same_message(mut mocks: Mocks) {
    let user = stored_user();
    mocks
        .users
        .expect_find_by_email()
        .withf(|email| email == "rex@example.com")
        .return_once(move |_| Ok(Some(user)));
    mocks.hasher.expect_verify().return_once(|_, _| Ok(false));
    mocks.tokens.expect_issue().never();

    let err = mocks
        .into_service()
        .login(login_request(" REX@example.com ", "wrong"))
        .await
        .expect_err("wrong password");

    assert_eq!(err.code(), ErrorCode::Unauthenticated);
    assert_eq!(err.message(), INCORRECT_CREDENTIALS);
}

#[rstest]
#[tokio::test]
async fn login_issues_token_for_valid_credentials(mut mocks: Mocks) {
    let user = stored_user();
    let expected_id = *user.id();
    mocks
        .users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(user)));
    mocks
        .hasher
        .expect_verify()
        .withf(|password, hash| password == "woofwoof" && hash.as_str() == "stored-hash")
        .return_once(|_, _| Ok(true));
    mocks
        .tokens
        .expect_issue()
        .return_once(|user| Ok(format!("token-for-{}", user.id())));

    let payload = mocks
        .into_service()
        .login(login_request("rex@example.com", "woofwoof"))
        .await
        .expect("login succeeds");

    assert_eq!(payload.user.id(), &expected_id);
    assert_eq!(payload.token, format!("token-for-{expected_id}"));
}

#[rstest]
#[tokio::test]
async fn update_profile_requires_session(mut mocks: Mocks) {
    mocks.users.expect_update().never();

    let err = mocks
        .into_service()
        .update_profile(None, UpdateProfileRequest::default())
        .await
        .expect_err("anonymous");

    assert_eq!(err.code(), ErrorCode::Unauthenticated);
    assert_eq!(err.message(), crate::domain::LOGIN_REQUIRED);
}

#[rstest]
#[tokio::test]
async fn update_profile_rehashes_new_password(mut mocks: Mocks) {
    let user = stored_user();
    let session = SessionUser::from(&user);
    mocks
        .hasher
        .expect_hash()
        .withf(|password| password == "newpass")
        .return_once(|_| Ok(PasswordHash::from_encoded("rehashed")));
    mocks
        .users
        .expect_update()
        .withf(|_, patch| {
            patch.username.is_none()
                && patch.email.is_none()
                && patch.password_hash.as_ref().map(PasswordHash::as_str) == Some("rehashed")
        })
        .return_once(move |_, _| Ok(Some(user)));

    let request = UpdateProfileRequest {
        password: Some(Zeroizing::new("newpass".to_owned())),
        ..UpdateProfileRequest::default()
    };
    mocks
        .into_service()
        .update_profile(Some(&session), request)
        .await
        .expect("update succeeds");
}

#[rstest]
#[tokio::test]
async fn update_profile_reports_missing_user(mut mocks: Mocks) {
    let session = SessionUser::from(&stored_user());
    mocks.users.expect_update().return_once(|_, _| Ok(None));

    let request = UpdateProfileRequest {
        username: Some("rex2".to_owned()),
        ..UpdateProfileRequest::default()
    };
    let err = mocks
        .into_service()
        .update_profile(Some(&session), request)
        .await
        .expect_err("missing user");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn me_populates_pets_and_status(mut mocks: Mocks) {
    let pet_id = PetId::random();
    let owner = Username::new("rex").expect("owner");
    let pet = Pet::from_draft(
        pet_id,
        PetDraft::try_from_parts("Biscuit", None, None, None).expect("draft"),
        owner,
    );
    let user = stored_user().with_pet_ids(vec![pet_id]);
    let session = SessionUser::from(&user);

    mocks
        .users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(user)));
    mocks
        .pets
        .expect_find_by_ids()
        .withf(move |ids| ids == [pet_id])
        .return_once(move |_| Ok(vec![pet]));
    mocks.statuses.expect_find_by_id().never();

    let profile = mocks
        .into_service()
        .me(Some(&session))
        .await
        .expect("profile");

    assert_eq!(profile.pets.len(), 1);
    assert_eq!(profile.pets[0].name, "Biscuit");
    assert!(profile.status.is_none());
}

#[rstest]
#[tokio::test]
async fn me_requires_session(mut mocks: Mocks) {
    mocks.users.expect_find_by_id().never();

    let err = mocks.into_service().me(None).await.expect_err("anonymous");
    assert_eq!(err.code(), ErrorCode::Unauthenticated);
}

//! Shared helpers for the end-to-end GraphQL tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the app wiring and the request helpers live here instead of being copied
//! into each file.

use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test, web};
use mockable::DefaultClock;
use petsocial::Trace;
use petsocial::domain::ports::{PasswordHasher, TokenIssuer};
use petsocial::domain::{Error, OwnershipPolicy, PasswordHash, SessionUser};
use petsocial::inbound::graphql::{GraphqlPorts, ServiceDeps, build_schema};
use petsocial::inbound::http::error::json_config;
use petsocial::inbound::http::graphql::{execute, schema};
use petsocial::inbound::http::state::HttpState;
use petsocial::outbound::memory::InMemoryStore;
use petsocial::outbound::security::JwtTokenIssuer;
use serde_json::{Value, json};
use zeroize::Zeroizing;

const SECRET: &[u8] = b"integration-test-secret-of-32-bytes!";

/// Stores passwords with a marker prefix so tests skip the Argon2 cost.
struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, Error> {
        Ok(PasswordHash::from_encoded(format!("plain:{password}")))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, Error> {
        Ok(hash.as_str() == format!("plain:{password}"))
    }
}

/// Token issuer sharing the app's signing secret.
pub fn token_issuer() -> JwtTokenIssuer {
    JwtTokenIssuer::new(
        Zeroizing::new(SECRET.to_vec()),
        Duration::from_secs(60 * 60),
        Arc::new(DefaultClock),
    )
}

/// Decode a token issued by the app under test.
pub fn decode(token: &str) -> SessionUser {
    token_issuer().decode(token).expect("token decodes")
}

/// App serving the GraphQL endpoints over a fresh in-memory store.
pub fn app(
    ownership: OwnershipPolicy,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let store = Arc::new(InMemoryStore::new());
    let tokens: Arc<dyn TokenIssuer> = Arc::new(token_issuer());
    let ports = GraphqlPorts::from_repositories(
        store.clone(),
        store.clone(),
        store,
        ServiceDeps {
            hasher: Arc::new(PlainHasher),
            tokens: tokens.clone(),
            clock: Arc::new(DefaultClock),
            ownership,
        },
    );
    App::new()
        .app_data(web::Data::new(HttpState::new(build_schema(ports), tokens)))
        .app_data(json_config())
        .wrap(Trace)
        .service(execute)
        .service(schema)
}

/// POST a GraphQL document and return the decoded response envelope.
pub async fn graphql<S, B>(app: &S, query: &str, variables: Value, token: Option<&str>) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut req = test::TestRequest::post()
        .uri("/graphql")
        .set_json(json!({ "query": query, "variables": variables }));
    if let Some(token) = token {
        req = req.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
    }
    let res = test::call_service(app, req.to_request()).await;
    assert!(res.status().is_success(), "graphql answered {}", res.status());
    test::read_body_json(res).await
}

/// Register `username` and return the issued token.
pub async fn sign_up<S, B>(app: &S, username: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let body = graphql(
        app,
        "mutation($username: String!, $email: String!) { \
           addUser(username: $username, email: $email, password: \"hunter22\") { token } \
         }",
        json!({ "username": username, "email": format!("{username}@example.com") }),
        None,
    )
    .await;
    body["data"]["addUser"]["token"]
        .as_str()
        .unwrap_or_else(|| panic!("addUser failed: {body}"))
        .to_owned()
}

/// `extensions.code` of the first error in `body`.
pub fn error_code(body: &Value) -> &str {
    body["errors"][0]["extensions"]["code"]
        .as_str()
        .unwrap_or_else(|| panic!("expected an error: {body}"))
}

//! GraphQL inbound adapter.
//!
//! Resolvers read the caller's [`Session`] from request data and forward raw
//! arguments to the driving ports held in [`GraphqlPorts`]. Domain errors
//! are converted into GraphQL errors with an `extensions.code`.

mod error;
mod mutation;
mod query;
mod session;
mod types;

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};
use mockable::Clock;

use crate::domain::ports::{
    AccountCommand, AccountQuery, PasswordHasher, PetCommand, PetQuery, PetRepository,
    StatusCommand, StatusQuery, StatusRepository, TokenIssuer, UserRepository,
};
use crate::domain::{AccountService, OwnershipPolicy, PetService, StatusService};

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use session::Session;
pub use types::{AuthObject, CommentObject, PetObject, StatusObject, UserObject};

/// Executable schema served at `/graphql`.
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Driving ports consulted by the resolvers.
#[derive(Clone)]
pub struct GraphqlPorts {
    pub accounts: Arc<dyn AccountCommand>,
    pub account_query: Arc<dyn AccountQuery>,
    pub pets: Arc<dyn PetCommand>,
    pub pet_query: Arc<dyn PetQuery>,
    pub statuses: Arc<dyn StatusCommand>,
    pub status_query: Arc<dyn StatusQuery>,
}

/// Collaborators shared by the domain services.
#[derive(Clone)]
pub struct ServiceDeps {
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub clock: Arc<dyn Clock>,
    pub ownership: OwnershipPolicy,
}

impl GraphqlPorts {
    /// Build the account, pet and status services over one set of
    /// repositories.
    pub fn from_repositories<U, P, S>(
        users: Arc<U>,
        pets: Arc<P>,
        statuses: Arc<S>,
        deps: ServiceDeps,
    ) -> Self
    where
        U: UserRepository + 'static,
        P: PetRepository + 'static,
        S: StatusRepository + 'static,
    {
        let ServiceDeps {
            hasher,
            tokens,
            clock,
            ownership,
        } = deps;
        let accounts = Arc::new(AccountService::new(
            users.clone(),
            pets.clone(),
            statuses.clone(),
            hasher,
            tokens,
        ));
        let pet_service = Arc::new(PetService::new(pets, users.clone(), ownership));
        let status_service = Arc::new(StatusService::new(statuses, users, ownership, clock));
        Self {
            accounts: accounts.clone(),
            account_query: accounts,
            pets: pet_service.clone(),
            pet_query: pet_service,
            statuses: status_service.clone(),
            status_query: status_service,
        }
    }
}

/// Build the executable schema over `ports`.
pub fn build_schema(ports: GraphqlPorts) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(ports)
        .finish()
}

/// Schema definition language for the API, without any data attached.
///
/// # Examples
/// ```
/// let sdl = petsocial::inbound::graphql::schema_sdl();
/// assert!(sdl.contains("type Mutation"));
/// ```
pub fn schema_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

//! Builders wiring repositories, credentials and services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use petsocial::domain::ports::TokenIssuer;
use petsocial::inbound::graphql::{GraphqlPorts, ServiceDeps, build_schema};
use petsocial::inbound::http::state::HttpState;
use petsocial::outbound::memory::InMemoryStore;
use petsocial::outbound::persistence::{
    DbPool, DieselPetRepository, DieselStatusRepository, DieselUserRepository,
};
use petsocial::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};
use tracing::{info, warn};

use super::ServerConfig;

fn build_ports(pool: Option<&DbPool>, deps: ServiceDeps) -> GraphqlPorts {
    match pool {
        Some(pool) => {
            info!("using PostgreSQL document store");
            GraphqlPorts::from_repositories(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselPetRepository::new(pool.clone())),
                Arc::new(DieselStatusRepository::new(pool.clone())),
                deps,
            )
        }
        None => {
            warn!("no database configured; documents are kept in memory");
            let store = Arc::new(InMemoryStore::new());
            GraphqlPorts::from_repositories(store.clone(), store.clone(), store, deps)
        }
    }
}

/// Build the shared HTTP state for the configured store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock = Arc::new(DefaultClock);
    let tokens: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::new(
        config.tokens.secret.clone(),
        config.tokens.ttl,
        clock.clone(),
    ));
    let deps = ServiceDeps {
        hasher: Arc::new(Argon2PasswordHasher::new()),
        tokens: tokens.clone(),
        clock,
        ownership: config.ownership,
    };
    let schema = build_schema(build_ports(config.db_pool.as_ref(), deps));
    web::Data::new(HttpState::new(schema, tokens))
}

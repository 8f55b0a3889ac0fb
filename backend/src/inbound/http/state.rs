//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on the executable schema and the token port.

use std::sync::Arc;

use crate::domain::ports::TokenIssuer;
use crate::inbound::graphql::AppSchema;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub schema: AppSchema,
    pub tokens: Arc<dyn TokenIssuer>,
}

impl HttpState {
    pub fn new(schema: AppSchema, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { schema, tokens }
    }

    /// State over an empty in-memory store, decoding tokens with `tokens`.
    #[cfg(test)]
    pub(crate) fn for_tests(tokens: Arc<dyn TokenIssuer>) -> Self {
        use crate::domain::OwnershipPolicy;
        use crate::inbound::graphql::{GraphqlPorts, ServiceDeps, build_schema};
        use crate::outbound::memory::InMemoryStore;
        use crate::outbound::security::Argon2PasswordHasher;

        let store = Arc::new(InMemoryStore::new());
        let ports = GraphqlPorts::from_repositories(
            store.clone(),
            store.clone(),
            store,
            ServiceDeps {
                hasher: Arc::new(Argon2PasswordHasher::new()),
                tokens: tokens.clone(),
                clock: Arc::new(mockable::DefaultClock),
                ownership: OwnershipPolicy::Unchecked,
            },
        );
        Self::new(build_schema(ports), tokens)
    }
}

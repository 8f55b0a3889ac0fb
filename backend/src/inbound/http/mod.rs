//! HTTP inbound adapter: GraphQL endpoints, health probes and bearer-token
//! session extraction.

pub mod error;
pub mod graphql;
pub mod health;
pub mod session;
pub mod state;
pub mod token_config;

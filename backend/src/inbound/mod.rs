//! Inbound adapters translating external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! The GraphQL schema lives under [`graphql`]; [`http`] serves it over
//! Actix together with the health probes.

pub mod graphql;
pub mod http;

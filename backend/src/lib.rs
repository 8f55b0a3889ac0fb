//! Pet social network backend.
//!
//! A GraphQL API over users, their pets and statuses with embedded
//! comments, arranged as ports and adapters:
//!
//! - [`domain`]: documents, validation and the use-case services
//! - [`inbound`]: GraphQL schema and its Actix HTTP surface
//! - [`outbound`]: PostgreSQL and in-memory stores, password hashing and
//!   session tokens
//! - [`middleware`]: request tracing

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::Trace;

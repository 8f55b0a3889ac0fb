//! Outbound adapters implementing the domain's driven ports.
//!
//! - **memory**: process-local document store, used when no database is
//!   configured
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **security**: Argon2 password hashing and JWT session tokens
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod security;

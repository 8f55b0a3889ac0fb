//! PostgreSQL persistence adapters using Diesel.
//!
//! Each repository owns a cloned [`DbPool`], checks out one connection per
//! port call, and translates between row structs (`models.rs`) and domain
//! documents. Row structs and the table definitions stay private to this
//! module.
//!
//! # Example
//!
//! ```ignore
//! use petsocial::outbound::persistence::{DbPool, DieselPetRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/petsocial")).await?;
//! let pets = DieselPetRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_pet_repository;
mod diesel_status_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_pet_repository::DieselPetRepository;
pub use diesel_status_repository::DieselStatusRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

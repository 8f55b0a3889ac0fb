//! Application settings and the HTTP server configuration object.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use petsocial::domain::OwnershipPolicy;
use petsocial::inbound::http::token_config::TokenSettings;
use petsocial::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings loaded from `PETSOCIAL_*` environment variables, CLI flags and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PETSOCIAL")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL. Without one the process keeps documents in memory.
    pub database_url: Option<String>,
    /// Require callers to own the pets, statuses and comments they change.
    #[ortho_config(default = false)]
    pub enforce_ownership: bool,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn ownership(&self) -> OwnershipPolicy {
        OwnershipPolicy::from_flag(self.enforce_ownership)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) ownership: OwnershipPolicy,
    pub(crate) tokens: TokenSettings,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, ownership: OwnershipPolicy, tokens: TokenSettings) -> Self {
        Self {
            bind_addr,
            ownership,
            tokens,
            db_pool: None,
        }
    }

    /// Attach a database pool; without one the in-memory store is used.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

//! Backend entry-point: loads configuration, prepares the document store and
//! serves the GraphQL API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use petsocial::inbound::http::health::HealthState;
use petsocial::inbound::http::token_config::{BuildMode, token_settings_from_env};
use petsocial::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Merge CLI arguments, environment and config files into [`AppSettings`].
fn load_settings(args: impl IntoIterator<Item = OsString>) -> Result<AppSettings> {
    AppSettings::load_from_iter(args).map_err(|err| eyre!("failed to load configuration: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings(std::env::args_os())?;
    let tokens = token_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid token configuration")?;

    let mut config = ServerConfig::new(settings.bind_addr(), settings.ownership(), tokens);
    if let Some(database_url) = settings.database_url.as_deref() {
        run_pending_migrations(database_url)
            .await
            .wrap_err("failed to apply database migrations")?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
        )
        .await
        .wrap_err("failed to create database pool")?;
        config = config.with_db_pool(pool);
    }

    info!(
        bind_addr = %settings.bind_addr(),
        ownership = ?settings.ownership(),
        "starting server"
    );
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?
        .await
        .wrap_err("server terminated with an error")
}

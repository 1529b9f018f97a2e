//! LENDGATE Server — application entry point.

use lendgate_auth::AuthConfig;
use lendgate_db::{DbConfig, DbManager};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("lendgate=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting LENDGATE server...");

    let db_config = DbConfig::from_env();
    let manager = match DbManager::connect(&db_config).await {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to database");
            std::process::exit(1);
        }
    };

    if let Err(e) = lendgate_db::run_migrations(manager.client()).await {
        tracing::error!(error = %e, "failed to run migrations");
        std::process::exit(1);
    }

    let auth_config = AuthConfig::from_env();
    if !auth_config.enforcement_enabled {
        tracing::warn!("allowlist enforcement is OFF (LENDGATE_ENFORCEMENT=off)");
    }
    tracing::info!(
        session_lifetime_secs = auth_config.session_lifetime_secs,
        address_policy = ?auth_config.address_policy,
        match_strategy = ?auth_config.match_strategy,
        "LENDGATE ready"
    );

    // TODO: mount the login/logout/validate HTTP endpoints once the
    // loan application's router is extracted into its own crate.

    tracing::info!("LENDGATE server stopped.");
}

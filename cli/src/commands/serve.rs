use crate::utils::settings::Settings;
use anyhow::Result;
use api::{ApiConfig, AppState};
use tracing::{info, warn};
use user::auth::PasswordHasher;

/// Open the database and run the HTTP API until shutdown.
pub async fn execute(settings: Settings, port: Option<u16>) -> Result<()> {
    info!("=== Job Board starting ===");

    if settings.uses_dev_secret() {
        warn!("JWT_SECRET is not set; tokens are signed with the development secret");
    }

    let db = database::initialize_database(settings.database_config()).await?;
    info!("Database ready at {}", settings.database_path.display());

    let state = AppState::new(db, PasswordHasher::default(), &settings.token_config()).map_err(anyhow::Error::from_boxed)?;
    let config = ApiConfig::new()
        .with_port(port.unwrap_or(settings.api_port))
        .with_test_data(settings.seed_demo_data);

    api::start_server_with_config(state, config)
        .await
        .map_err(anyhow::Error::from_boxed)?;

    info!("=== Job Board shutdown complete ===");
    Ok(())
}

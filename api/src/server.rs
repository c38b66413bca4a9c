use crate::{create_router, AppState, BoxError};
use tokio::signal;
use tracing::{error, info, warn};

pub const DEFAULT_PORT: u16 = 8080;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Port to listen on
    pub port: u16,
    /// Whether to seed demo users and jobs into an empty database
    pub init_test_data: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            init_test_data: cfg!(debug_assertions),
        }
    }
}

impl ApiConfig {
    /// Create a new API configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set whether to seed demo data
    pub fn with_test_data(mut self, init: bool) -> Self {
        self.init_test_data = init;
        self
    }
}

/// Serve the API until ctrl-c or SIGTERM.
pub async fn start_server_with_config(state: AppState, config: ApiConfig) -> Result<(), BoxError> {
    if config.init_test_data {
        info!("Seeding demo data");
        if let Err(e) = crate::test_data::init_test_data(&state).await {
            warn!("Failed to seed demo data: {}", e);
        }
    }

    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on {}", addr);
    info!(
        "Swagger UI available at http://localhost:{}/api/swagger",
        config.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

/// Resolves on ctrl-c, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

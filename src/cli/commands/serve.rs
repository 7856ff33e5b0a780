use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, debug, trace, error};

use crate::config::Settings;
use crate::router::create_router;
use crate::schemas::AppState;

pub async fn serve(settings: Settings) -> Result<()> {
    trace!("Entering serve function");
    info!("finpanel dashboard service starting up");
    debug!("Account API: {}", settings.api_base_url);
    debug!("Bind address: {}", settings.bind_address);

    let bind_address = settings.bind_address.clone();
    let state = AppState::new(settings);

    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");

    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("finpanel API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}

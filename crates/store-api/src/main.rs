//! # COMPIA Store
//!
//! Backend for the COMPIA bookstore: product catalog, address prefill
//! and shipping quotes.
//!
//! ## Usage
//!
//! ```bash
//! # Optional environment variables
//! export ORIGIN_CEP=01310100
//! export PORT=8080
//!
//! # Run the server
//! compia-store
//! ```

use store_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Store origin CEP: {}", state.config.origin_cep);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("COMPIA Store starting on http://{}", addr);

    if !is_prod {
        info!("Products: GET http://{}/api/v1/products", addr);
        info!("Shipping: POST http://{}/api/v1/shipping/quote", addr);
        info!("Address: GET http://{}/api/v1/address/01310100", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! # Application State
//!
//! Shared state for the Axum application: the product repository, the
//! lookup client and the shipping estimator, plus env-driven config.

use crate::repository::MemoryProductRepository;
use std::sync::Arc;
use store_core::{
    BoxedAddressLookup, BoxedProductRepository, Cep, ProductCatalog, ShippingEstimator,
};
use store_viacep::ViaCepClient;

/// Default store origin: Avenida Paulista, São Paulo
pub const DEFAULT_ORIGIN_CEP: &str = "01310100";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Fixed store origin CEP (per deployment, not user-editable)
    pub origin_cep: Cep,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let origin_raw =
            std::env::var("ORIGIN_CEP").unwrap_or_else(|_| DEFAULT_ORIGIN_CEP.to_string());
        let origin_cep = Cep::parse(&origin_raw)
            .map_err(|e| anyhow::anyhow!("Invalid ORIGIN_CEP {:?}: {}", origin_raw, e))?;

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            origin_cep,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Product catalog persistence
    pub repository: BoxedProductRepository,
    /// Address prefill lookup
    pub address_lookup: BoxedAddressLookup,
    /// Shipping cost estimator
    pub estimator: Arc<ShippingEstimator>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create the AppState with the ViaCEP client and the seed catalog
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let catalog = load_product_catalog()?;
        let repository: BoxedProductRepository =
            Arc::new(MemoryProductRepository::with_catalog(catalog));

        let viacep = Arc::new(
            ViaCepClient::from_env()
                .map_err(|e| anyhow::anyhow!("Failed to initialize ViaCEP client: {}", e))?,
        );

        let estimator = Arc::new(ShippingEstimator::new(
            viacep.clone(),
            config.origin_cep.clone(),
        ));

        Ok(Self {
            repository,
            address_lookup: viacep,
            estimator,
            config,
        })
    }
}

/// Load the seed catalog from config file
fn load_product_catalog() -> anyhow::Result<ProductCatalog> {
    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = ProductCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} products from {}", catalog.products.len(), path);
            return Ok(catalog);
        }
    }

    tracing::warn!("No product catalog found, using empty catalog");
    Ok(ProductCatalog::new())
}

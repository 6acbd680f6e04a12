//! # Routes
//!
//! Axum router configuration for the store API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Catalog:
///   - GET    /api/v1/products - List active products
///   - GET    /api/v1/products/{id} - Get product by ID
///   - POST   /api/v1/products - Create product
///   - PUT    /api/v1/products/{id} - Update product
///   - DELETE /api/v1/products/{id} - Delete product
///
/// - Checkout:
///   - GET  /api/v1/address/{cep} - Address prefill for a CEP
///   - POST /api/v1/shipping/quote - Shipping quote for a cart
pub fn create_router(state: AppState) -> Router {
    // The storefront is served from another origin in development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let product_routes = Router::new()
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/products/{product_id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        );

    let checkout_routes = Router::new()
        .route("/address/{cep}", get(handlers::lookup_address))
        .route("/shipping/quote", post(handlers::quote_shipping));

    let api_routes = Router::new().merge(product_routes).merge(checkout_routes);

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // API v1
        .nest("/api/v1", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

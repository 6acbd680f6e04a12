//! # store-api
//!
//! HTTP API layer for compia-store-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for the product catalog
//! - Checkout endpoints: address prefill and shipping quotes
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/v1/products` | List products |
//! | GET | `/api/v1/products/:id` | Get product |
//! | POST | `/api/v1/products` | Create product |
//! | PUT | `/api/v1/products/:id` | Update product |
//! | DELETE | `/api/v1/products/:id` | Delete product |
//! | GET | `/api/v1/address/:cep` | Address prefill |
//! | POST | `/api/v1/shipping/quote` | Shipping quote |

pub mod handlers;
pub mod repository;
pub mod routes;
pub mod state;

pub use repository::MemoryProductRepository;
pub use routes::create_router;
pub use state::{AppConfig, AppState};

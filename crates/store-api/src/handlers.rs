//! # Request Handlers
//!
//! Axum request handlers for the store API: catalog CRUD, address
//! prefill and shipping quotes.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use store_core::{
    CartLine, CartSnapshot, Cep, Currency, Price, Product, ProductKind, ShippingQuote, StoreError,
};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Shipping quote request
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    /// Destination CEP, 8 digits with or without separator
    pub destination_cep: String,
    /// Cart contents
    pub items: Vec<QuoteItem>,
}

/// Item in a quote request
#[derive(Debug, Deserialize)]
pub struct QuoteItem {
    /// Product ID
    pub product_id: String,
    /// Quantity
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Shipping quote response
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    /// Service label ("Digital", "Standard", "PAC")
    pub service: String,
    /// Cost in centavos
    pub cost_cents: i64,
    /// Formatted cost ("R$ 12,50")
    pub cost_display: String,
    /// Estimated delivery lead time
    pub lead_time_days: u32,
}

impl From<ShippingQuote> for QuoteResponse {
    fn from(quote: ShippingQuote) -> Self {
        Self {
            service: quote.service.as_str().to_string(),
            cost_cents: quote.cost.amount,
            cost_display: quote.cost.display(),
            lead_time_days: quote.lead_time_days,
        }
    }
}

/// Create product request
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: ProductKind,
    /// Price in centavos
    pub price_cents: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Update product request; only the provided fields change
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: Option<ProductKind>,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn store_error_to_response(err: StoreError) -> HandlerError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "compia-store",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Estimate shipping for a cart going to a destination CEP
#[instrument(skip(state, request), fields(items = request.items.len()))]
pub async fn quote_shipping(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, HandlerError> {
    // Malformed codes are rejected here; the estimator never sees them.
    let destination =
        Cep::parse(&request.destination_cep).map_err(store_error_to_response)?;

    let mut lines = Vec::with_capacity(request.items.len());
    for item in &request.items {
        if item.quantity == 0 {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    format!("Quantity must be at least 1 for {}", item.product_id),
                    400,
                )),
            ));
        }

        let product = state
            .repository
            .get(&item.product_id)
            .await
            .map_err(store_error_to_response)?
            .ok_or_else(|| {
                store_error_to_response(StoreError::ProductNotFound {
                    product_id: item.product_id.clone(),
                })
            })?;

        lines.push(CartLine::from_product(&product, item.quantity));
    }

    let cart = CartSnapshot::new(lines);

    info!(
        "Quoting shipping: destination={}, {} items, subtotal={}",
        destination,
        cart.item_count(),
        cart.subtotal.display()
    );

    // The estimator never fails; lookups degrade internally.
    let quote = state.estimator.estimate(&destination, &cart).await;

    Ok(Json(quote.into()))
}

/// Resolve a CEP to an address for checkout prefill
#[instrument(skip(state))]
pub async fn lookup_address(
    State(state): State<AppState>,
    Path(cep): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let cep = Cep::parse(&cep).map_err(store_error_to_response)?;

    let address = state
        .address_lookup
        .lookup_address(&cep)
        .await
        .map_err(|e| {
            error!("Address lookup failed: {}", e);
            store_error_to_response(e)
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(format!("CEP not found: {}", cep), 404)),
            )
        })?;

    Ok(Json(address))
}

/// List active products
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HandlerError> {
    let products: Vec<_> = state
        .repository
        .list()
        .await
        .map_err(store_error_to_response)?
        .into_iter()
        .filter(|p| p.active)
        .collect();

    Ok(Json(serde_json::json!({
        "products": products,
        "count": products.len()
    })))
}

/// Get a single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let product = state
        .repository
        .get(&product_id)
        .await
        .map_err(store_error_to_response)?
        .ok_or_else(|| {
            store_error_to_response(StoreError::ProductNotFound {
                product_id: product_id.clone(),
            })
        })?;

    Ok(Json(product))
}

/// Register a new product
#[instrument(skip(state, request), fields(title = %request.title))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if request.price_cents < 0 {
        return Err(store_error_to_response(StoreError::InvalidPrice {
            message: "price_cents must be >= 0".to_string(),
        }));
    }

    let price = Price::from_cents(request.price_cents, Currency::BRL);
    let mut product = match request.kind {
        ProductKind::Physical => Product::physical("", request.title, price),
        ProductKind::Digital => Product::digital("", request.title, price),
    }
    .with_author(request.author)
    .with_description(request.description)
    .with_category(request.category);
    product.image_url = request.image_url;

    let created = state
        .repository
        .create(product)
        .await
        .map_err(store_error_to_response)?;

    info!("Created product: {} ({})", created.title, created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing product; unspecified fields keep their values
#[instrument(skip(state, request), fields(product_id = %product_id))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let mut product = state
        .repository
        .get(&product_id)
        .await
        .map_err(store_error_to_response)?
        .ok_or_else(|| {
            store_error_to_response(StoreError::ProductNotFound {
                product_id: product_id.clone(),
            })
        })?;

    if let Some(title) = request.title {
        product.title = title;
    }
    if let Some(author) = request.author {
        product.author = author;
    }
    if let Some(description) = request.description {
        product.description = description;
    }
    if let Some(kind) = request.kind {
        product.kind = kind;
    }
    if let Some(price_cents) = request.price_cents {
        if price_cents < 0 {
            return Err(store_error_to_response(StoreError::InvalidPrice {
                message: "price_cents must be >= 0".to_string(),
            }));
        }
        product.price = Price::from_cents(price_cents, Currency::BRL);
    }
    if let Some(category) = request.category {
        product.category = category;
    }
    if let Some(image_url) = request.image_url {
        product.image_url = Some(image_url);
    }
    if let Some(active) = request.active {
        product.active = active;
    }

    let updated = state
        .repository
        .update(&product_id, product)
        .await
        .map_err(store_error_to_response)?;

    Ok(Json(updated))
}

/// Remove a product
#[instrument(skip(state), fields(product_id = %product_id))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<StatusCode, HandlerError> {
    state
        .repository
        .delete(&product_id)
        .await
        .map_err(store_error_to_response)?;

    info!("Deleted product: {}", product_id);

    Ok(StatusCode::NO_CONTENT)
}

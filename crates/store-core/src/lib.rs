//! # store-core
//!
//! Core types and traits for the COMPIA store engine.
//!
//! This crate provides:
//! - `ShippingEstimator` and `ShippingQuote` for checkout shipping costs
//! - `Cep` for normalized Brazilian postal codes
//! - `AddressLookup` / `RegionLookup` traits for postal code resolution
//! - `Product`, `ProductCatalog` and the `ProductRepository` trait
//! - `CartLine` / `CartSnapshot` for the checkout flow
//! - `StoreError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use store_core::{Cep, CartSnapshot, CartLine, ShippingEstimator};
//!
//! // Build the estimator once, with the deployment's origin CEP
//! let estimator = ShippingEstimator::new(region_lookup, Cep::parse("01310-100")?);
//!
//! // Quote a cart going to the customer's CEP
//! let destination = Cep::parse(&form.cep)?;
//! let cart = CartSnapshot::new(lines);
//! let quote = estimator.estimate(&destination, &cart).await;
//!
//! println!("{} em até {} dias", quote.cost.display(), quote.lead_time_days);
//! ```

pub mod cart;
pub mod catalog;
pub mod cep;
pub mod error;
pub mod lookup;
pub mod money;
pub mod product;
pub mod shipping;

// Re-exports for convenience
pub use cart::{CartLine, CartSnapshot};
pub use catalog::{BoxedProductRepository, ProductCatalog, ProductRepository};
pub use cep::Cep;
pub use error::{StoreError, StoreResult};
pub use lookup::{
    Address, AddressLookup, BoxedAddressLookup, BoxedRegionLookup, RegionInfo, RegionLookup,
};
pub use money::{Currency, Price};
pub use product::{Product, ProductKind};
pub use shipping::{
    QuoteSequencer, ShippingEstimator, ShippingQuote, ShippingService,
    FREE_SHIPPING_THRESHOLD_CENTS, MAX_COST_CENTS, MIN_COST_CENTS, UNIT_WEIGHT_GRAMS,
};

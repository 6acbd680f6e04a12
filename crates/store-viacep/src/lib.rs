//! # store-viacep
//!
//! ViaCEP postal code lookup for compia-store-rs.
//!
//! This crate provides:
//! - `ViaCepClient`, implementing the `AddressLookup` and `RegionLookup`
//!   traits from `store-core`
//! - `ViaCepConfig` with an overridable base URL and bounded timeout
//!
//! ## Usage
//!
//! ```rust,ignore
//! use store_viacep::ViaCepClient;
//! use store_core::{AddressLookup, Cep};
//!
//! let client = ViaCepClient::from_env()?;
//! let cep = Cep::parse("01310-100")?;
//!
//! if let Some(address) = client.lookup_address(&cep).await? {
//!     println!("{}, {} - {}", address.street, address.city, address.region_code);
//! }
//! ```

pub mod client;
pub mod config;

pub use client::ViaCepClient;
pub use config::ViaCepConfig;

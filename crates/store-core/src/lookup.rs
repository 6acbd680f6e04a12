//! # Postal Lookup Traits
//!
//! Capability traits for the external CEP lookup services. The checkout
//! flow uses `AddressLookup` to prefill address fields; the shipping
//! estimator only needs `RegionLookup`. A single client (ViaCEP)
//! typically implements both.
//!
//! Contract: an unknown CEP is `Ok(None)`, a transport or service
//! failure is `Err`. Callers that can degrade (the estimator) treat
//! both the same way; callers that cannot (address prefill) surface the
//! distinction.

use crate::cep::Cep;
use crate::error::StoreResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A resolved street address for checkout prefill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street name ("Avenida Paulista")
    pub street: String,
    /// District/neighborhood ("Bela Vista")
    pub district: String,
    /// City ("São Paulo")
    pub city: String,
    /// State abbreviation ("SP")
    pub region_code: String,
}

/// Coarse geographic unit used for the shipping discount/surcharge
/// decision. Never used for routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionInfo {
    /// Opaque region code (state abbreviation, e.g., "SP")
    pub region_code: String,
}

impl RegionInfo {
    pub fn new(region_code: impl Into<String>) -> Self {
        Self {
            region_code: region_code.into(),
        }
    }
}

/// Resolve a CEP to a full address
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Look up the address for a CEP. `Ok(None)` means the service
    /// answered but does not know the code.
    async fn lookup_address(&self, cep: &Cep) -> StoreResult<Option<Address>>;
}

/// Resolve a CEP to its region
#[async_trait]
pub trait RegionLookup: Send + Sync {
    /// Look up the region for a CEP. `Ok(None)` means the service
    /// answered but does not know the code.
    async fn lookup_region(&self, cep: &Cep) -> StoreResult<Option<RegionInfo>>;
}

/// Type alias for a shared address lookup (dynamic dispatch)
pub type BoxedAddressLookup = Arc<dyn AddressLookup>;

/// Type alias for a shared region lookup (dynamic dispatch)
pub type BoxedRegionLookup = Arc<dyn RegionLookup>;

impl From<Address> for RegionInfo {
    fn from(address: Address) -> Self {
        Self {
            region_code: address.region_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_from_address() {
        let address = Address {
            street: "Avenida Paulista".into(),
            district: "Bela Vista".into(),
            city: "São Paulo".into(),
            region_code: "SP".into(),
        };

        let region: RegionInfo = address.into();
        assert_eq!(region.region_code, "SP");
    }
}

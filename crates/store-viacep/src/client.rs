//! # ViaCEP Client
//!
//! HTTP client for the ViaCEP API (`GET /ws/{cep}/json/`), implementing
//! both lookup traits from `store-core`. ViaCEP answers unknown codes
//! with HTTP 200 and `{"erro": true}`, which maps to `Ok(None)`;
//! transport errors and non-2xx statuses map to `Err` so the estimator
//! can degrade and the address prefill can report the outage.

use crate::config::ViaCepConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use store_core::{Address, AddressLookup, Cep, RegionInfo, RegionLookup, StoreError, StoreResult};
use tracing::{debug, instrument, warn};

/// ViaCEP lookup client
pub struct ViaCepClient {
    config: ViaCepConfig,
    client: Client,
}

/// Raw ViaCEP response body
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    erro: bool,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

impl ViaCepClient {
    /// Create a new client from config
    pub fn new(config: ViaCepConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> StoreResult<Self> {
        let config = ViaCepConfig::from_env()?;
        Ok(Self::new(config))
    }

    #[instrument(skip(self), fields(cep = %cep))]
    async fn fetch(&self, cep: &Cep) -> StoreResult<Option<ViaCepResponse>> {
        let url = format!("{}/ws/{}/json/", self.config.base_url, cep.as_digits());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("ViaCEP error: status={}, body={}", status, body);
            return Err(StoreError::LookupFailed {
                service: "viacep".to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let parsed: ViaCepResponse = serde_json::from_str(&body).map_err(|e| {
            StoreError::Serialization(format!("Failed to parse ViaCEP response: {}", e))
        })?;

        if parsed.erro {
            debug!("ViaCEP does not know this code");
            return Ok(None);
        }

        Ok(Some(parsed))
    }
}

#[async_trait]
impl AddressLookup for ViaCepClient {
    async fn lookup_address(&self, cep: &Cep) -> StoreResult<Option<Address>> {
        Ok(self.fetch(cep).await?.map(|r| Address {
            street: r.logradouro,
            district: r.bairro,
            city: r.localidade,
            region_code: r.uf,
        }))
    }
}

#[async_trait]
impl RegionLookup for ViaCepClient {
    async fn lookup_region(&self, cep: &Cep) -> StoreResult<Option<RegionInfo>> {
        Ok(self
            .fetch(cep)
            .await?
            .map(|r| RegionInfo { region_code: r.uf }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cep() -> Cep {
        Cep::parse("01310-100").unwrap()
    }

    async fn client_for(server: &MockServer) -> ViaCepClient {
        ViaCepClient::new(
            ViaCepConfig::default()
                .with_base_url(server.uri())
                .with_timeout(Duration::from_millis(500)),
        )
    }

    #[tokio::test]
    async fn resolves_known_cep() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ws/01310100/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cep": "01310-100",
                "logradouro": "Avenida Paulista",
                "bairro": "Bela Vista",
                "localidade": "São Paulo",
                "uf": "SP"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        let address = client.lookup_address(&cep()).await.unwrap().unwrap();
        assert_eq!(address.street, "Avenida Paulista");
        assert_eq!(address.city, "São Paulo");
        assert_eq!(address.region_code, "SP");

        let region = client.lookup_region(&cep()).await.unwrap().unwrap();
        assert_eq!(region.region_code, "SP");
    }

    #[tokio::test]
    async fn unknown_cep_is_none_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ws/01310100/json/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "erro": true })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        assert!(client.lookup_region(&cep()).await.unwrap().is_none());
        assert!(client.lookup_address(&cep()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn server_error_is_lookup_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        let err = client.lookup_region(&cep()).await.unwrap_err();
        assert!(err.is_lookup_failure());
    }

    #[tokio::test]
    async fn timeout_is_lookup_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "uf": "SP" }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await; // 500 ms timeout

        let err = client.lookup_region(&cep()).await.unwrap_err();
        assert!(err.is_lookup_failure());
    }

    #[tokio::test]
    async fn garbage_body_is_serialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        let err = client.lookup_region(&cep()).await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}

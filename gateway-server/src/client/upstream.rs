//! Upstream Inventory API Client
//!
//! HTTP client for the third-party vehicle inventory service. All endpoints
//! are POST with a token in the `Authorization` header and answer a
//! `{status, data}` envelope. Exchange rates ride along with every search
//! response and are the rates the pricing core uses - they are never cached
//! independently here.
//!
//! The [`ListingsApi`] trait is the seam: handlers and the reference-refresh
//! job depend on it, tests substitute an in-memory stub.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::models::listing::VehicleListing;
use shared::models::rates::ExchangeRates;
use shared::models::search::{FiltersRequest, SearchRequest};

use crate::utils::{AppError, AppResult};

/// Envelope of a `search_car` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<SearchData>,
}

/// Payload of a `search_car` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub cars: Vec<VehicleListing>,
    #[serde(default)]
    pub rates: ExchangeRates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<ListingCount>,
    /// Unmodeled payload fields, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Result counts of a filtered search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingCount {
    pub filtered: Option<u64>,
    pub total: Option<u64>,
}

/// One listing as returned by `get_car_info`, normalized
#[derive(Debug, Clone)]
pub struct CarInfo {
    pub listing: VehicleListing,
    pub rates: ExchangeRates,
    /// The raw upstream payload, for lossless pass-through
    pub raw: serde_json::Value,
}

impl CarInfo {
    /// Normalize the `get_car_info` payload
    ///
    /// Depending on upstream version the listing sits under `extracted_data`
    /// or directly in `data`; rates may accompany either shape.
    pub fn from_payload(data: serde_json::Value) -> AppResult<Self> {
        let rates = data
            .get("rates")
            .and_then(|r| serde_json::from_value(r.clone()).ok())
            .unwrap_or_default();

        let listing_value = data.get("extracted_data").cloned().unwrap_or_else(|| data.clone());
        let listing: VehicleListing = serde_json::from_value(listing_value)
            .map_err(|e| AppError::upstream(format!("unrecognized car payload: {e}")))?;

        Ok(Self {
            listing,
            rates,
            raw: data,
        })
    }
}

/// The upstream inventory API surface the gateway depends on
#[async_trait]
pub trait ListingsApi: Send + Sync {
    /// Filtered, paginated listing search
    async fn search_car(&self, request: &SearchRequest) -> AppResult<SearchEnvelope>;

    /// Full detail for a single listing
    async fn get_car_info(&self, infoid: i64) -> AppResult<CarInfo>;

    /// Distinct values of one listing field (filter population)
    async fn available_filters(&self, request: &FiltersRequest) -> AppResult<serde_json::Value>;
}

/// reqwest-backed [`ListingsApi`] implementation
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
    token: String,
}

impl UpstreamClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.token.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(format!("{status}: {text}")));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("invalid upstream JSON: {e}")))
    }
}

#[async_trait]
impl ListingsApi for UpstreamClient {
    async fn search_car(&self, request: &SearchRequest) -> AppResult<SearchEnvelope> {
        self.post("search_car", request).await
    }

    async fn get_car_info(&self, infoid: i64) -> AppResult<CarInfo> {
        #[derive(Serialize)]
        struct CarInfoRequest {
            infoid: i64,
        }

        #[derive(Deserialize)]
        struct CarInfoEnvelope {
            status: String,
            message: Option<String>,
            data: Option<serde_json::Value>,
        }

        let envelope: CarInfoEnvelope = self.post("get_car_info", &CarInfoRequest { infoid }).await?;

        if envelope.status != "success" {
            return Err(AppError::upstream(
                envelope.message.unwrap_or_else(|| "upstream reported failure".to_string()),
            ));
        }

        let data = envelope
            .data
            .ok_or_else(|| AppError::not_found(format!("listing {infoid}")))?;
        CarInfo::from_payload(data)
    }

    async fn available_filters(&self, request: &FiltersRequest) -> AppResult<serde_json::Value> {
        self.post("getAvailableFilters", request).await
    }
}

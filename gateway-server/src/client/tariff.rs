//! External Tariff Service Client
//!
//! Optional enrichment path: a third-party landed-cost calculator that
//! quotes customs charges from vehicle parameters and current rates. The
//! service is slow and flaky, so every call carries its own timeout and any
//! failure degrades to `None` - enrichment must never fail a response.

use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::fuel::EngineType;
use shared::models::listing::VehicleListing;
use shared::models::rates::ExchangeRates;

use crate::pricing::{AgeBucket, PricingConfig, age::classify, kw_to_horsepower};

/// Rate defaults applied when the upstream response carried no rates
const DEFAULT_EUR: &str = "91.11";
const DEFAULT_USD: &str = "76.91";
const DEFAULT_CNY: &str = "11.05";

/// Query parameters of a tariff calculation request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TariffQuery {
    pub price: String,
    pub currency: &'static str,
    pub vehicle_age: AgeBucket,
    pub engine_type: EngineType,
    pub engine_horse_power: String,
    pub import_purpose: &'static str,
    #[serde(rename = "EUR")]
    pub eur: String,
    #[serde(rename = "USD")]
    pub usd: String,
    #[serde(rename = "CNY")]
    pub cny: String,
    /// Omitted for electric vehicles
    #[serde(
        rename = "engineVolumeInCubicCentimeters",
        skip_serializing_if = "Option::is_none"
    )]
    pub engine_volume_cm3: Option<String>,
}

/// Build the tariff query for a listing, `None` when it cannot be quoted
///
/// The service rejects incomplete parameter sets, so everything is checked
/// here: positive price, resolvable age bucket, positive horsepower, and a
/// displacement unless the drivetrain is electric.
pub fn build_tariff_query(
    listing: &VehicleListing,
    rates: &ExchangeRates,
    config: &PricingConfig,
    now: DateTime<Utc>,
) -> Option<TariffQuery> {
    let price = listing.price_cny.filter(|p| *p > Decimal::ZERO)?;

    let engine_type = listing.engine_type();
    let is_electric = engine_type == EngineType::ElectricMotor;

    let engine_volume_cm3 = match listing.displacement_cm3() {
        Some(volume) => Some(volume.to_string()),
        None if is_electric => None,
        None => return None,
    };

    let horse_power = kw_to_horsepower(listing.power_kw.unwrap_or(Decimal::ZERO), config)?;

    let vehicle_age = classify(listing.firstregshortdate.as_deref(), listing.firstregyear, now)?;

    Some(TariffQuery {
        price: price.to_string(),
        currency: "CNY",
        vehicle_age,
        engine_type,
        engine_horse_power: horse_power.to_string(),
        import_purpose: "USAGE",
        eur: format_rate(rates.eur, DEFAULT_EUR),
        usd: format_rate(rates.usd, DEFAULT_USD),
        cny: format_rate(rates.cny, DEFAULT_CNY),
        engine_volume_cm3: if is_electric { None } else { engine_volume_cm3 },
    })
}

/// Rates go on the wire with exactly two decimals
fn format_rate(rate: Option<Decimal>, default: &str) -> String {
    match rate.filter(|r| *r > Decimal::ZERO) {
        Some(rate) => format!("{:.2}", rate.round_dp(2)),
        None => default.to_string(),
    }
}

/// HTTP client for the tariff service
#[derive(Debug, Clone)]
pub struct TariffClient {
    client: Client,
    base_url: String,
}

impl TariffClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Quote one listing, `None` on any failure
    pub async fn calculate(
        &self,
        listing: &VehicleListing,
        rates: &ExchangeRates,
        config: &PricingConfig,
        now: DateTime<Utc>,
    ) -> Option<serde_json::Value> {
        let query = build_tariff_query(listing, rates, config, now)?;

        let response = match self
            .client
            .get(&self.base_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&query)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(infoid = listing.infoid, error = %e, "tariff request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(
                infoid = listing.infoid,
                status = %response.status(),
                "tariff service rejected request"
            );
            return None;
        }

        let body: serde_json::Value = response.json().await.ok()?;
        body.get("result").cloned().filter(|r| !r.is_null())
    }
}

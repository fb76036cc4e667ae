//! Listing Proxy + Pricing Enrichment
//!
//! The upstream inventory API is the source of truth for listing data; this
//! module proxies it and attaches the computed landed price to every
//! listing. Each listing is priced independently against the rates that
//! arrived with the same response - enrichment of one listing can never
//! affect another, and an unpriceable listing gets the sentinel summary
//! instead of an error.

use axum::{Json, Router, extract::State, routing::post};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::AppState;
use crate::pricing::{self, PricingConfig};
use crate::utils::AppResult;
use shared::models::breakdown::{BreakdownLine, PriceSummary};
use shared::models::listing::VehicleListing;
use shared::models::rates::ExchangeRates;
use shared::models::search::SearchRequest;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/search_car", post(search_car))
        .route("/api/get_car_info", post(get_car_info))
}

/// Computed pricing attached to each proxied listing
#[derive(Debug, Serialize)]
pub struct PricingEnrichment {
    pub summary: PriceSummary,
    pub breakdown: Vec<BreakdownLine>,
    /// The upstream duty figure was replaced by our own computation
    pub duty_overridden: bool,
}

/// One listing with its computed pricing
#[derive(Serialize)]
struct EnrichedCar {
    #[serde(flatten)]
    listing: VehicleListing,
    pricing: PricingEnrichment,
}

#[derive(Serialize)]
struct EnrichedSearchData {
    cars: Vec<EnrichedCar>,
    rates: ExchangeRates,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<crate::client::upstream::ListingCount>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize)]
struct EnrichedSearchResponse {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<EnrichedSearchData>,
}

/// Price one listing with the rates that accompanied it
fn enrich(
    listing: &VehicleListing,
    rates: &ExchangeRates,
    config: &PricingConfig,
    now: DateTime<Utc>,
) -> PricingEnrichment {
    let quote = pricing::compose(listing, rates, config, now);
    PricingEnrichment {
        summary: pricing::summarize(quote.as_ref()),
        breakdown: pricing::format_breakdown(quote.as_ref()),
        duty_overridden: quote
            .as_ref()
            .and_then(|q| q.duty.as_ref())
            .map(|d| d.was_overridden)
            .unwrap_or(false),
    }
}

/// POST /api/search_car - proxied search, every hit enriched
async fn search_car(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<EnrichedSearchResponse>> {
    request.validate()?;

    let envelope = state.upstream.search_car(&request).await?;
    let now = Utc::now();

    let data = envelope.data.map(|data| {
        let rates = data.rates;
        let cars = data
            .cars
            .into_iter()
            .map(|listing| {
                let pricing = enrich(&listing, &rates, &state.pricing, now);
                EnrichedCar { listing, pricing }
            })
            .collect();
        EnrichedSearchData {
            cars,
            rates,
            count: data.count,
            extra: data.extra,
        }
    });

    Ok(Json(EnrichedSearchResponse {
        status: envelope.status,
        message: envelope.message,
        data,
    }))
}

#[derive(Debug, Deserialize, Validate)]
struct CarInfoRequest {
    #[validate(range(min = 1))]
    infoid: i64,
}

#[derive(Serialize)]
struct CarInfoResponse {
    status: String,
    /// Raw upstream payload, lossless
    data: serde_json::Value,
    pricing: PricingEnrichment,
    /// External tariff quote, present when the enrichment path is enabled
    /// and the service answered in time
    #[serde(skip_serializing_if = "Option::is_none")]
    tariff_quote: Option<serde_json::Value>,
}

/// POST /api/get_car_info - proxied detail with full enrichment
async fn get_car_info(
    State(state): State<AppState>,
    Json(request): Json<CarInfoRequest>,
) -> AppResult<Json<CarInfoResponse>> {
    request.validate()?;

    let info = state.upstream.get_car_info(request.infoid).await?;
    let now = Utc::now();
    let pricing = enrich(&info.listing, &info.rates, &state.pricing, now);

    let tariff_quote = match &state.tariff {
        Some(tariff) => {
            tariff
                .calculate(&info.listing, &info.rates, &state.pricing, now)
                .await
        }
        None => None,
    };

    Ok(Json(CarInfoResponse {
        status: "success".to_string(),
        data: info.raw,
        pricing,
        tariff_quote,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    #[test]
    fn test_enrich_priceable_listing() {
        let listing = VehicleListing {
            price_cny: Some(Decimal::from(150_000)),
            firstregshortdate: Some("2020-06-01".to_string()),
            engine_volume_ml: Some(2000),
            fuel_type: Some("Gasoline".to_string()),
            ..Default::default()
        };
        let rates = ExchangeRates::new(Decimal::new(1105, 2), Decimal::from(95));
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let enrichment = enrich(&listing, &rates, &PricingConfig::default(), now);
        assert_eq!(enrichment.summary.total_rub, Some(2_711_250));
        assert!(enrichment.breakdown.last().unwrap().is_total);
        // no upstream duty supplied, so the computed figure took over
        assert!(enrichment.duty_overridden);
    }

    #[test]
    fn test_enrich_unpriceable_listing() {
        let listing = VehicleListing::default();
        let rates = ExchangeRates::default();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let enrichment = enrich(&listing, &rates, &PricingConfig::default(), now);
        assert_eq!(enrichment.summary.total_rub, None);
        assert_eq!(enrichment.breakdown.len(), 1);
        assert!(!enrichment.duty_overridden);
    }
}

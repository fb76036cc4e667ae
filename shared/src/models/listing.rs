//! Vehicle Listing Model
//!
//! Field names follow the upstream inventory API. Every pricing-relevant
//! field is optional: partially-loaded listings are the normal case and the
//! pricing core degrades instead of failing. Fields this service does not
//! interpret are preserved verbatim in `extra` so the proxy stays lossless.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fuel::{EngineType, FuelType};

/// A single vehicle listing as returned by the upstream inventory API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleListing {
    /// Upstream listing identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infoid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brandname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seriesname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imageurl: Option<String>,
    /// Odometer reading, in 10k km units upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<Decimal>,

    /// Asking price in CNY
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_cny: Option<Decimal>,
    /// First registration date, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstregshortdate: Option<String>,
    /// First registration year, fallback when the exact date is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstregyear: Option<i32>,
    /// Engine displacement; upstream labels it milliliters but the value is
    /// numerically cm³ (1400 ml = 1400 cm³)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_volume_ml: Option<u32>,
    /// Raw upstream fuel-type string, see [`FuelType::from_upstream`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    /// Electric power in kW
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_kw: Option<Decimal>,

    /// Import duty in EUR as reported upstream (may be stale; validated
    /// against an independent computation before use)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_duty: Option<Decimal>,
    /// Customs clearance fee in RUB, pass-through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customs_fee_rub: Option<Decimal>,
    /// Recycling fee in RUB, pass-through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recycling_fee_rub: Option<Decimal>,
    /// Excise tax in RUB as reported upstream (display only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excise_tax_rub: Option<Decimal>,
    /// Upstream's own landed total; superseded by the computed breakdown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price_rub: Option<Decimal>,

    /// Unmodeled upstream fields, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl VehicleListing {
    /// Normalized fuel type; absent field maps to `Unrecognized`
    pub fn fuel(&self) -> FuelType {
        self.fuel_type
            .as_deref()
            .map(FuelType::from_upstream)
            .unwrap_or(FuelType::Unrecognized)
    }

    /// Engine type for duty purposes
    pub fn engine_type(&self) -> EngineType {
        self.fuel().engine_type()
    }

    /// Displacement in cm³, treating 0 as absent
    pub fn displacement_cm3(&self) -> Option<u32> {
        self.engine_volume_ml.filter(|v| *v > 0)
    }
}

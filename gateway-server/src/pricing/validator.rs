//! Duty Validator
//!
//! The upstream inventory API ships its own import-duty figure with every
//! listing, but it is computed on the supplier side and goes stale. Before a
//! duty value enters the landed price it is cross-checked against an
//! independent computation from the schedule in [`super::duty`]; a
//! divergence beyond tolerance overrides the supplied value and is recorded
//! on the `audit` log target. Validation never fails a quote - when the
//! independent computation is impossible the supplied value is trusted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::listing::VehicleListing;
use shared::models::rates::ExchangeRates;

use super::age::classify;
use super::config::PricingConfig;
use super::duty::compute_duty;

/// Outcome of the duty cross-check
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDuty {
    /// The duty value pricing should proceed with, EUR
    pub duty_eur: Decimal,
    /// True when the supplied value was replaced by the computed one
    pub was_overridden: bool,
    /// Human-readable decision, for diagnostics
    pub reason: String,
}

impl ValidatedDuty {
    fn trusted(duty_eur: Decimal, reason: &str) -> Self {
        Self {
            duty_eur,
            was_overridden: false,
            reason: reason.to_string(),
        }
    }
}

/// Cross-check the upstream duty figure against an independent computation
///
/// The returned value is always usable; an absent upstream figure counts as
/// zero and is replaced by the computed value whenever one exists.
pub fn validate_duty(
    listing: &VehicleListing,
    rates: &ExchangeRates,
    config: &PricingConfig,
    now: DateTime<Utc>,
) -> ValidatedDuty {
    let supplied = listing.import_duty.unwrap_or(Decimal::ZERO);

    let Some(cny_to_eur) = rates.cny_to_eur() else {
        return ValidatedDuty::trusted(supplied, "insufficient rate data");
    };

    let computed = classify(listing.firstregshortdate.as_deref(), listing.firstregyear, now)
        .and_then(|bucket| {
            compute_duty(
                bucket,
                listing.displacement_cm3().unwrap_or(0),
                listing.price_cny,
                Some(cny_to_eur),
            )
        });

    let Some(computed) = computed else {
        return ValidatedDuty::trusted(supplied, "cannot independently compute");
    };

    // 5% of the supplied value, but never tighter than 100 EUR
    let tolerance = (config.duty_tolerance_ratio * supplied).max(config.duty_tolerance_floor_eur);
    let difference = (computed - supplied).abs();

    if difference > tolerance {
        tracing::warn!(
            target: "audit",
            infoid = listing.infoid,
            supplied_eur = %supplied,
            computed_eur = %computed,
            difference_eur = %difference,
            "import duty mismatch, overriding supplied value"
        );
        return ValidatedDuty {
            duty_eur: computed,
            was_overridden: true,
            reason: format!("supplied {supplied} EUR replaced by computed {computed} EUR"),
        };
    }

    ValidatedDuty::trusted(supplied, "supplied value within tolerance")
}

//! Price Composer
//!
//! Assembles the full landed price in RUB: converted vehicle price,
//! validated duty, pass-through customs fees and the fixed service fees from
//! [`super::config::PricingConfig`]. All arithmetic stays in `Decimal` at
//! full precision; rounding is the formatter's job.
//!
//! Missing business data never raises an error - a listing that cannot be
//! priced yields `None` and the UI renders a placeholder.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::fuel::EngineType;
use shared::models::listing::VehicleListing;
use shared::models::rates::ExchangeRates;

use super::config::PricingConfig;
use super::validator::validate_duty;

/// The duty component of a composed price
#[derive(Debug, Clone, PartialEq)]
pub struct DutyLine {
    pub duty_eur: Decimal,
    pub duty_rub: Decimal,
    /// The upstream-supplied figure was replaced by our own computation
    pub was_overridden: bool,
}

/// A fully composed landed price, full precision, never mutated
///
/// Carries every intermediate value plus the exchange rates used, so the
/// formatter and any downstream audit can show provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub price_cny: Decimal,
    pub price_rub: Decimal,
    /// `None` for electric drivetrains - no displacement-based duty applies
    pub duty: Option<DutyLine>,
    pub customs_fee_rub: Decimal,
    pub recycling_fee_rub: Decimal,
    pub logistics_fee_rub: Decimal,
    pub brokerage_fee_rub: Decimal,
    pub commission_rub: Decimal,
    pub delivery_fee_rub: Decimal,
    pub total_rub: Decimal,
    /// CNY→RUB rate the quote was built with
    pub cny_rate: Decimal,
    /// EUR→RUB rate, absent when the duty line degraded to zero
    pub eur_rate: Option<Decimal>,
}

/// Compose the landed price for one listing
///
/// Returns `None` when the origin price or the CNY rate is absent or
/// non-positive; every other gap degrades gracefully (duty falls back to the
/// supplied value or to zero).
pub fn compose(
    listing: &VehicleListing,
    rates: &ExchangeRates,
    config: &PricingConfig,
    now: DateTime<Utc>,
) -> Option<PriceBreakdown> {
    let price_cny = listing.price_cny.filter(|p| *p > Decimal::ZERO)?;
    let cny_rate = rates.cny_rub()?;

    let price_rub = price_cny * cny_rate;

    // Electric drivetrains carry no displacement-based duty; the duty line
    // is skipped entirely, not shown as zero.
    let duty = match listing.engine_type() {
        EngineType::ElectricMotor => None,
        EngineType::DieselOrGasoline => {
            let validated = validate_duty(listing, rates, config, now);
            let duty_rub = match rates.eur_rub() {
                Some(eur_rate) => validated.duty_eur * eur_rate,
                None => {
                    tracing::warn!(
                        infoid = listing.infoid,
                        duty_eur = %validated.duty_eur,
                        "no EUR rate, duty line degrades to zero"
                    );
                    Decimal::ZERO
                }
            };
            Some(DutyLine {
                duty_eur: validated.duty_eur,
                duty_rub,
                was_overridden: validated.was_overridden,
            })
        }
    };

    let customs_fee_rub = listing.customs_fee_rub.unwrap_or(Decimal::ZERO);
    let recycling_fee_rub = listing.recycling_fee_rub.unwrap_or(Decimal::ZERO);
    let logistics_fee_rub = config.logistics_fee_cny * cny_rate;

    let duty_rub = duty.as_ref().map(|d| d.duty_rub).unwrap_or(Decimal::ZERO);
    let total_rub = price_rub
        + duty_rub
        + customs_fee_rub
        + recycling_fee_rub
        + logistics_fee_rub
        + config.brokerage_fee_rub
        + config.commission_rub
        + config.delivery_fee_rub;

    Some(PriceBreakdown {
        price_cny,
        price_rub,
        duty,
        customs_fee_rub,
        recycling_fee_rub,
        logistics_fee_rub,
        brokerage_fee_rub: config.brokerage_fee_rub,
        commission_rub: config.commission_rub,
        delivery_fee_rub: config.delivery_fee_rub,
        total_rub,
        cny_rate,
        eur_rate: rates.eur_rub(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn rates() -> ExchangeRates {
        ExchangeRates::new(Decimal::new(1105, 2), Decimal::from(95))
    }

    fn four_year_old_gasoline() -> VehicleListing {
        VehicleListing {
            infoid: Some(7),
            price_cny: Some(Decimal::from(150_000)),
            firstregshortdate: Some("2020-06-01".to_string()),
            engine_volume_ml: Some(2000),
            fuel_type: Some("Gasoline".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_composition() {
        let quote = compose(&four_year_old_gasoline(), &rates(), &PricingConfig::default(), fixed_now())
            .unwrap();

        assert_eq!(quote.price_rub, Decimal::from(1_657_500));
        let duty = quote.duty.as_ref().unwrap();
        assert_eq!(duty.duty_eur, Decimal::from(5_400));
        assert_eq!(duty.duty_rub, Decimal::from(513_000));
        assert_eq!(quote.logistics_fee_rub, Decimal::from(165_750));
        assert_eq!(quote.total_rub, Decimal::from(2_711_250));
    }

    #[test]
    fn test_missing_price_is_unpriceable() {
        let mut listing = four_year_old_gasoline();
        listing.price_cny = None;
        assert!(compose(&listing, &rates(), &PricingConfig::default(), fixed_now()).is_none());

        listing.price_cny = Some(Decimal::ZERO);
        assert!(compose(&listing, &rates(), &PricingConfig::default(), fixed_now()).is_none());
    }

    #[test]
    fn test_missing_cny_rate_is_unpriceable() {
        let no_cny = ExchangeRates {
            cny: None,
            eur: Some(Decimal::from(95)),
            usd: None,
        };
        assert!(compose(&four_year_old_gasoline(), &no_cny, &PricingConfig::default(), fixed_now()).is_none());
    }

    #[test]
    fn test_missing_eur_rate_degrades_duty_to_zero() {
        let no_eur = ExchangeRates {
            cny: Some(Decimal::new(1105, 2)),
            eur: None,
            usd: None,
        };
        let quote = compose(&four_year_old_gasoline(), &no_eur, &PricingConfig::default(), fixed_now())
            .unwrap();

        let duty = quote.duty.as_ref().unwrap();
        assert_eq!(duty.duty_rub, Decimal::ZERO);
        // everything else still adds up
        assert_eq!(
            quote.total_rub,
            Decimal::from(1_657_500 + 165_750 + 75_000 + 100_000 + 200_000)
        );
    }

    #[test]
    fn test_electric_skips_duty_entirely() {
        let listing = VehicleListing {
            price_cny: Some(Decimal::from(200_000)),
            firstregshortdate: Some("2022-03-15".to_string()),
            fuel_type: Some("Pure Electric".to_string()),
            power_kw: Some(Decimal::from(150)),
            ..Default::default()
        };
        let quote = compose(&listing, &rates(), &PricingConfig::default(), fixed_now()).unwrap();

        assert!(quote.duty.is_none());
        // 200 000 × 11.05 + 165 750 + 75 000 + 100 000 + 200 000
        assert_eq!(quote.total_rub, Decimal::from(2_750_750));
    }

    #[test]
    fn test_pass_through_fees_are_included() {
        let mut listing = four_year_old_gasoline();
        listing.customs_fee_rub = Some(Decimal::from(13_541));
        listing.recycling_fee_rub = Some(Decimal::from(5_200));

        let quote = compose(&listing, &rates(), &PricingConfig::default(), fixed_now()).unwrap();
        assert_eq!(quote.customs_fee_rub, Decimal::from(13_541));
        assert_eq!(quote.recycling_fee_rub, Decimal::from(5_200));
        assert_eq!(quote.total_rub, Decimal::from(2_711_250 + 13_541 + 5_200));
    }

    #[test]
    fn test_rates_recorded_for_provenance() {
        let quote = compose(&four_year_old_gasoline(), &rates(), &PricingConfig::default(), fixed_now())
            .unwrap();
        assert_eq!(quote.cny_rate, Decimal::new(1105, 2));
        assert_eq!(quote.eur_rate, Some(Decimal::from(95)));
    }
}

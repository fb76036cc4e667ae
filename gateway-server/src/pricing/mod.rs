//! Landed-Price Engine
//!
//! Everything needed to turn a raw listing (price in CNY, engine specs,
//! registration date) plus the current exchange rates into an auditable
//! landed cost in RUB:
//!
//! - [`age`] - registration date → age bucket
//! - [`duty`] - customs-duty schedule and calculation
//! - [`validator`] - cross-check of upstream-supplied duty figures
//! - [`composer`] - full landed-price assembly
//! - [`breakdown`] - display-line formatting
//! - [`config`] - the single home of every business constant
//!
//! The engine is pure, synchronous computation: each quote is a function of
//! (listing, rates, config, now). "Now" is always an explicit parameter so
//! tests can pin the clock.

pub mod age;
pub mod breakdown;
pub mod composer;
pub mod config;
pub mod duty;
pub mod validator;

pub use age::AgeBucket;
pub use breakdown::{format_breakdown, summarize};
pub use composer::{DutyLine, PriceBreakdown, compose};
pub use config::PricingConfig;
pub use validator::{ValidatedDuty, validate_duty};

use rust_decimal::prelude::*;

/// Convert electric power in kW to whole horsepower
///
/// Returns `None` for absent or non-positive power.
pub fn kw_to_horsepower(power_kw: Decimal, config: &PricingConfig) -> Option<u32> {
    if power_kw <= Decimal::ZERO {
        return None;
    }
    (power_kw * config.horsepower_per_kw)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kw_to_horsepower() {
        let config = PricingConfig::default();
        // 100 kW × 1.36 = 136 hp
        assert_eq!(kw_to_horsepower(Decimal::from(100), &config), Some(136));
        // 110.5 kW × 1.36 = 150.28 → 150 hp
        assert_eq!(kw_to_horsepower(Decimal::new(1105, 1), &config), Some(150));
    }

    #[test]
    fn test_kw_to_horsepower_rejects_non_positive() {
        let config = PricingConfig::default();
        assert_eq!(kw_to_horsepower(Decimal::ZERO, &config), None);
        assert_eq!(kw_to_horsepower(Decimal::from(-5), &config), None);
    }
}

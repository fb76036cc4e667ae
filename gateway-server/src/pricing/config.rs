//! Pricing Configuration
//!
//! The single home of every fixed business constant in the landed-price
//! calculation. These values change with supplier contracts, so calculation
//! code must reference this struct and never inline the numbers.

use rust_decimal::Decimal;

/// Fixed fees and thresholds of the landed-price calculation
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    /// Flat origin-country logistics charge, billed in CNY
    pub logistics_fee_cny: Decimal,
    /// Documentation and brokerage fee, RUB
    pub brokerage_fee_rub: Decimal,
    /// Company commission, RUB
    pub commission_rub: Decimal,
    /// Domestic delivery fee, RUB
    pub delivery_fee_rub: Decimal,
    /// Relative tolerance when cross-checking the upstream duty figure
    pub duty_tolerance_ratio: Decimal,
    /// Absolute tolerance floor for the duty cross-check, EUR
    pub duty_tolerance_floor_eur: Decimal,
    /// Horsepower per kilowatt
    pub horsepower_per_kw: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            logistics_fee_cny: Decimal::from_parts(15_000, 0, 0, false, 0),
            brokerage_fee_rub: Decimal::from_parts(75_000, 0, 0, false, 0),
            commission_rub: Decimal::from_parts(100_000, 0, 0, false, 0),
            delivery_fee_rub: Decimal::from_parts(200_000, 0, 0, false, 0),
            // 5%, but never tighter than 100 EUR
            duty_tolerance_ratio: Decimal::from_parts(5, 0, 0, false, 2),
            duty_tolerance_floor_eur: Decimal::from_parts(100, 0, 0, false, 0),
            horsepower_per_kw: Decimal::from_parts(136, 0, 0, false, 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::*;

    #[test]
    fn test_canonical_values() {
        let config = PricingConfig::default();
        assert_eq!(config.logistics_fee_cny, Decimal::from(15_000));
        assert_eq!(config.brokerage_fee_rub, Decimal::from(75_000));
        assert_eq!(config.commission_rub, Decimal::from(100_000));
        assert_eq!(config.delivery_fee_rub, Decimal::from(200_000));
        assert_eq!(config.duty_tolerance_ratio.to_f64(), Some(0.05));
        assert_eq!(config.duty_tolerance_floor_eur, Decimal::from(100));
        assert_eq!(config.horsepower_per_kw.to_f64(), Some(1.36));
    }
}

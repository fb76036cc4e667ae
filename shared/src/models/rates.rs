//! Exchange Rates Model
//!
//! Rates arrive with every upstream listing response and are expressed as
//! "1 unit of foreign currency = N RUB". A zero, negative or absent rate
//! means "cannot price" - the accessors below never hand out a non-positive
//! multiplier.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// RUB-per-unit exchange rates supplied by the upstream inventory API
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    /// 1 CNY in RUB
    #[serde(rename = "CNY")]
    pub cny: Option<Decimal>,
    /// 1 EUR in RUB
    #[serde(rename = "EUR")]
    pub eur: Option<Decimal>,
    /// 1 USD in RUB (only used by the external tariff service)
    #[serde(rename = "USD", skip_serializing_if = "Option::is_none")]
    pub usd: Option<Decimal>,
}

impl ExchangeRates {
    pub fn new(cny: Decimal, eur: Decimal) -> Self {
        Self {
            cny: Some(cny),
            eur: Some(eur),
            usd: None,
        }
    }

    /// CNY→RUB multiplier, `None` unless strictly positive
    pub fn cny_rub(&self) -> Option<Decimal> {
        self.cny.filter(|r| *r > Decimal::ZERO)
    }

    /// EUR→RUB multiplier, `None` unless strictly positive
    pub fn eur_rub(&self) -> Option<Decimal> {
        self.eur.filter(|r| *r > Decimal::ZERO)
    }

    /// CNY→EUR cross rate, derived from the two RUB multipliers
    ///
    /// Requires both rates to be positive; dividing the RUB multipliers
    /// converts origin-currency amounts directly to EUR.
    pub fn cny_to_eur(&self) -> Option<Decimal> {
        let cny = self.cny_rub()?;
        let eur = self.eur_rub()?;
        Some(cny / eur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::*;

    #[test]
    fn test_positive_rates() {
        let rates = ExchangeRates::new(Decimal::from_f64(11.05).unwrap(), Decimal::from(95));
        assert!(rates.cny_rub().is_some());
        assert!(rates.eur_rub().is_some());

        let cross = rates.cny_to_eur().unwrap();
        // 11.05 / 95 ≈ 0.11631...
        assert!(cross > Decimal::from_f64(0.116).unwrap());
        assert!(cross < Decimal::from_f64(0.117).unwrap());
    }

    #[test]
    fn test_zero_rate_is_unusable() {
        let rates = ExchangeRates {
            cny: Some(Decimal::ZERO),
            eur: Some(Decimal::from(95)),
            usd: None,
        };
        assert_eq!(rates.cny_rub(), None);
        assert_eq!(rates.cny_to_eur(), None);
    }

    #[test]
    fn test_absent_rate_is_unusable() {
        let rates = ExchangeRates {
            cny: Some(Decimal::from(11)),
            eur: None,
            usd: None,
        };
        assert_eq!(rates.eur_rub(), None);
        assert_eq!(rates.cny_to_eur(), None);
    }

    #[test]
    fn test_upstream_field_names() {
        let rates: ExchangeRates = serde_json::from_str(r#"{"CNY": 11.34, "EUR": 93.78}"#).unwrap();
        assert_eq!(rates.cny.unwrap().to_f64(), Some(11.34));
        assert_eq!(rates.eur.unwrap().to_f64(), Some(93.78));
        assert!(rates.usd.is_none());
    }
}

//! Customs Duty Schedule
//!
//! EUR-per-cm³ rate tables keyed by age bucket and displacement bracket,
//! plus the percentage-with-floor rule for vehicles under 3 years old.
//! Rates follow the unified import tariff for private-use vehicles.
//!
//! Uses rust_decimal for the monetary arithmetic; tables are const Decimals.

use rust_decimal::Decimal;

use super::age::AgeBucket;

/// Displacement bracket upper bounds in cm³ (exclusive); the last bracket
/// is open-ended
const BRACKET_BOUNDS_CM3: [u32; 5] = [1000, 1500, 1800, 2300, 3000];

const fn dec(units: u32, scale: u32) -> Decimal {
    Decimal::from_parts(units, 0, 0, false, scale)
}

/// EUR/cm³ for vehicles 3-5 years old, by bracket
const RATES_FROM_3_TO_5: [Decimal; 6] = [
    dec(15, 1),
    dec(17, 1),
    dec(25, 1),
    dec(27, 1),
    dec(30, 1),
    dec(36, 1),
];

/// EUR/cm³ for vehicles over 5 years old, by bracket
const RATES_OVER_5: [Decimal; 6] = [
    dec(30, 1),
    dec(32, 1),
    dec(35, 1),
    dec(48, 1),
    dec(50, 1),
    dec(57, 1),
];

/// EUR/cm³ floor for vehicles under 3 years old, by bracket
const FLOOR_RATES_UNDER_3: [Decimal; 6] = [
    dec(25, 1),
    dec(35, 1),
    dec(55, 1),
    dec(75, 1),
    dec(120, 1),
    dec(155, 1),
];

/// Share of the EUR price used for the under-3 percentage component
const PRICE_SHARE_UNDER_3: Decimal = dec(48, 2);

fn bracket_index(displacement_cm3: u32) -> usize {
    BRACKET_BOUNDS_CM3
        .iter()
        .position(|bound| displacement_cm3 < *bound)
        .unwrap_or(BRACKET_BOUNDS_CM3.len())
}

/// Flat EUR/cm³ rate for the 3-5 and over-5 schedules
///
/// `None` for the under-3 bucket (price-based, see [`compute_duty`]) and for
/// missing displacement.
pub fn flat_rate(bucket: AgeBucket, displacement_cm3: u32) -> Option<Decimal> {
    if displacement_cm3 == 0 {
        return None;
    }
    let index = bracket_index(displacement_cm3);
    match bucket {
        AgeBucket::From3To5 => Some(RATES_FROM_3_TO_5[index]),
        AgeBucket::Over5 => Some(RATES_OVER_5[index]),
        AgeBucket::Under3 => None,
    }
}

/// Import duty in EUR
///
/// - 3-5 / over-5: flat rate × displacement.
/// - Under 3: `max(48% × price_eur, floor_rate × displacement)`; needs the
///   origin price and the CNY→EUR rate, otherwise the duty cannot be
///   computed independently and the caller falls back to the upstream value.
///
/// Returns `None` whenever an input required by the applicable schedule is
/// missing; never errors.
pub fn compute_duty(
    bucket: AgeBucket,
    displacement_cm3: u32,
    price_cny: Option<Decimal>,
    cny_to_eur: Option<Decimal>,
) -> Option<Decimal> {
    if let Some(rate) = flat_rate(bucket, displacement_cm3) {
        return Some(rate * Decimal::from(displacement_cm3));
    }

    if bucket != AgeBucket::Under3 || displacement_cm3 == 0 {
        return None;
    }

    let price_cny = price_cny.filter(|p| *p > Decimal::ZERO)?;
    let cny_to_eur = cny_to_eur.filter(|r| *r > Decimal::ZERO)?;

    let price_eur = price_cny * cny_to_eur;
    let percent_component = PRICE_SHARE_UNDER_3 * price_eur;
    let floor_component = FLOOR_RATES_UNDER_3[bracket_index(displacement_cm3)]
        * Decimal::from(displacement_cm3);

    Some(percent_component.max(floor_component))
}

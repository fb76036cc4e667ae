//! Vehicle Age Classifier
//!
//! Customs duty schedules are keyed by vehicle age at the moment of
//! calculation, bucketed into under 3 years, 3-5 years and over 5 years.
//! Age is continuous: a listing can cross a bucket boundary from one day to
//! the next, which is intended behavior, so classification is re-evaluated
//! on every call against an explicit `now`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::time::parse_short_date;

/// Average days per year including leap years
const DAYS_PER_YEAR: f64 = 365.25;

/// Age bucket of the customs-duty schedule
///
/// Wire names follow the external tariff service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeBucket {
    #[serde(rename = "UNDER_3")]
    Under3,
    #[serde(rename = "FROM_3_TO_5")]
    From3To5,
    #[serde(rename = "OVER_5")]
    Over5,
}

/// Resolve the first-registration date from the listing fields
///
/// An explicit `YYYY-MM-DD` date wins; an unparseable or absent date falls
/// back to the registration year, assumed January 1. Neither yields `None`.
pub fn resolve_registration_date(date: Option<&str>, year: Option<i32>) -> Option<NaiveDate> {
    if let Some(parsed) = date.and_then(parse_short_date) {
        return Some(parsed);
    }
    year.and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
}

/// Age in years at `now`, fractional
pub fn age_in_years(registered: NaiveDate, now: DateTime<Utc>) -> f64 {
    let registered = registered.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc();
    (now - registered).num_seconds() as f64 / (DAYS_PER_YEAR * 86_400.0)
}

/// Classify a listing into an age bucket, `None` when no usable date exists
///
/// Buckets are half-open: `[0, 3)`, `[3, 5)`, `[5, ∞)`.
pub fn classify(date: Option<&str>, year: Option<i32>, now: DateTime<Utc>) -> Option<AgeBucket> {
    let registered = resolve_registration_date(date, year)?;
    let age = age_in_years(registered, now);

    if age < 3.0 {
        Some(AgeBucket::Under3)
    } else if age < 5.0 {
        Some(AgeBucket::From3To5)
    } else {
        Some(AgeBucket::Over5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_explicit_date_wins_over_year() {
        let resolved = resolve_registration_date(Some("2021-09-01"), Some(2015)).unwrap();
        assert_eq!(resolved, NaiveDate::from_ymd_opt(2021, 9, 1).unwrap());
    }

    #[test]
    fn test_invalid_date_falls_back_to_year() {
        let resolved = resolve_registration_date(Some("not-a-date"), Some(2020)).unwrap();
        assert_eq!(resolved, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[test]
    fn test_no_date_no_year() {
        assert_eq!(resolve_registration_date(None, None), None);
        assert_eq!(classify(None, None, at(2024, 6, 1)), None);
    }

    #[test]
    fn test_exactly_three_years_is_from_3_to_5() {
        // 2021-06-01 → 2024-06-01 spans the 2024 leap day: 1096 days ≈ 3.0006 years
        let bucket = classify(Some("2021-06-01"), None, at(2024, 6, 1));
        assert_eq!(bucket, Some(AgeBucket::From3To5));
    }

    #[test]
    fn test_just_under_three_years() {
        let bucket = classify(Some("2021-06-02"), None, at(2024, 6, 1));
        assert_eq!(bucket, Some(AgeBucket::Under3));
    }

    #[test]
    fn test_exactly_five_years_is_over_5() {
        // 2019-06-01 → 2024-06-01: 1827 days ≈ 5.002 years
        let bucket = classify(Some("2019-06-01"), None, at(2024, 6, 1));
        assert_eq!(bucket, Some(AgeBucket::Over5));
    }

    #[test]
    fn test_year_only_fallback() {
        // registration year 2020, evaluated 2024-06-01 → ≈ 4.4 years
        let registered = resolve_registration_date(None, Some(2020)).unwrap();
        let age = age_in_years(registered, at(2024, 6, 1));
        assert!(age > 4.4 && age < 4.5, "age was {age}");
        assert_eq!(classify(None, Some(2020), at(2024, 6, 1)), Some(AgeBucket::From3To5));
    }

    #[test]
    fn test_classification_moves_with_now() {
        let date = Some("2021-06-01");
        assert_eq!(classify(date, None, at(2023, 1, 1)), Some(AgeBucket::Under3));
        assert_eq!(classify(date, None, at(2025, 1, 1)), Some(AgeBucket::From3To5));
        assert_eq!(classify(date, None, at(2027, 1, 1)), Some(AgeBucket::Over5));
    }
}

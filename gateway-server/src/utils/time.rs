//! Time parsing helpers

use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` date string, `None` on any malformation
///
/// Registration dates come from the upstream API and are occasionally
/// garbage; an unparseable date is a fallback case, not an error.
pub fn parse_short_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_date() {
        assert_eq!(
            parse_short_date("2021-09-01"),
            NaiveDate::from_ymd_opt(2021, 9, 1)
        );
    }

    #[test]
    fn test_garbage_is_none() {
        assert_eq!(parse_short_date(""), None);
        assert_eq!(parse_short_date("2021-13-01"), None);
        assert_eq!(parse_short_date("01.09.2021"), None);
        assert_eq!(parse_short_date("2021"), None);
    }
}

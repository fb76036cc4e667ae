//! Search Request DTOs
//!
//! Request bodies for the upstream inventory API, validated at the gateway
//! boundary before being forwarded. Range filters are `[min, max]` pairs;
//! negative bounds are rejected here so they never reach the pricing core or
//! the upstream service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Inclusive `[min, max]` range filter, serialized as a two-element array
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter(
    #[serde(with = "rust_decimal::serde::float")] pub Decimal,
    #[serde(with = "rust_decimal::serde::float")] pub Decimal,
);

impl RangeFilter {
    pub fn min(&self) -> Decimal {
        self.0
    }

    pub fn max(&self) -> Decimal {
        self.1
    }
}

fn validate_range(range: &RangeFilter) -> Result<(), ValidationError> {
    if range.min() < Decimal::ZERO {
        return Err(ValidationError::new("range_negative"));
    }
    if range.min() > range.max() {
        return Err(ValidationError::new("range_inverted"));
    }
    Ok(())
}

/// Search filters, all optional; array fields are OR-ed upstream
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brandname: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seriesname: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<Vec<String>>,
    #[validate(custom(function = "validate_range"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_cny: Option<RangeFilter>,
    #[validate(custom(function = "validate_range"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price_rub: Option<RangeFilter>,
    #[validate(custom(function = "validate_range"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstregyear: Option<RangeFilter>,
    #[validate(custom(function = "validate_range"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<RangeFilter>,
    #[validate(custom(function = "validate_range"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_volume_ml: Option<RangeFilter>,
    #[validate(custom(function = "validate_range"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_kw: Option<RangeFilter>,
}

/// Pagination window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct Pagination {
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u32 {
    20
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// Sort order, field names are upstream-defined
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sorting {
    pub sort_by: String,
    pub sort_direction: String,
}

impl Default for Sorting {
    fn default() -> Self {
        Self {
            sort_by: "infoid".to_string(),
            sort_direction: "DESC".to_string(),
        }
    }
}

/// `search_car` request body
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(nested)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<SearchFilters>,
    #[validate(nested)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorting: Option<Sorting>,
}

/// `getAvailableFilters` request body (distinct-value extraction)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FiltersRequest {
    /// Upstream field whose distinct values are requested
    pub fields_to_extract: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<serde_json::Value>,
    #[validate(range(min = 1, max = 200))]
    #[serde(default = "default_filters_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_filters_limit() -> u32 {
    200
}

impl FiltersRequest {
    /// Distinct values of one field, unfiltered
    pub fn for_field(field: impl Into<String>) -> Self {
        Self {
            fields_to_extract: field.into(),
            filters: None,
            limit: default_filters_limit(),
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_filter_wire_format() {
        let filters = SearchFilters {
            price_cny: Some(RangeFilter(Decimal::from(50_000), Decimal::from(300_000))),
            ..Default::default()
        };
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json["price_cny"][0], 50_000.0);
        assert_eq!(json["price_cny"][1], 300_000.0);
    }

    #[test]
    fn test_negative_range_rejected() {
        let filters = SearchFilters {
            price_cny: Some(RangeFilter(Decimal::from(-1), Decimal::from(100))),
            ..Default::default()
        };
        assert!(filters.validate().is_err());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let filters = SearchFilters {
            mileage: Some(RangeFilter(Decimal::from(10), Decimal::from(5))),
            ..Default::default()
        };
        assert!(filters.validate().is_err());
    }

    #[test]
    fn test_oversized_limit_rejected() {
        let request = SearchRequest {
            pagination: Some(Pagination {
                limit: 500,
                offset: 0,
            }),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_defaults() {
        let request: SearchRequest = serde_json::from_str("{}").unwrap();
        assert!(request.filters.is_none());
        assert!(request.validate().is_ok());

        let pagination: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(pagination.limit, 20);
        assert_eq!(pagination.offset, 0);
    }
}

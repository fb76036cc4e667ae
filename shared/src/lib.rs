//! Shared wire models for the imported-vehicle storefront
//!
//! Data types exchanged between the gateway server, the upstream inventory
//! API and the browser UI:
//!
//! - [`models::listing`] - vehicle listing record (upstream field names)
//! - [`models::rates`] - exchange rates accompanying every listing response
//! - [`models::fuel`] - fuel-type taxonomy and engine-type mapping
//! - [`models::breakdown`] - landed-price breakdown display contract
//! - [`models::search`] - search/filter request DTOs

pub mod models;

pub use models::breakdown::{BreakdownLine, PriceSummary};
pub use models::fuel::{EngineType, FuelCategory, FuelType};
pub use models::listing::VehicleListing;
pub use models::rates::ExchangeRates;
pub use models::search::{FiltersRequest, Pagination, RangeFilter, SearchFilters, SearchRequest, Sorting};

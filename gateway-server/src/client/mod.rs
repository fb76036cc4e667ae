//! Outbound HTTP clients
//!
//! - [`upstream`] - the third-party vehicle inventory API
//! - [`tariff`] - the external landed-cost calculator (optional enrichment)

pub mod tariff;
pub mod upstream;

pub use tariff::TariffClient;
pub use upstream::{CarInfo, ListingsApi, SearchData, SearchEnvelope, UpstreamClient};

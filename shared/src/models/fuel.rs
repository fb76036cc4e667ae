//! Fuel Type Taxonomy
//!
//! The upstream inventory API reports fuel types as free-form strings. This
//! module pins every observed value to a closed enum and provides two total
//! mappings:
//!
//! - [`FuelType::engine_type`] - the coarse split the customs schedule cares
//!   about (electric drivetrains carry no displacement-based duty)
//! - [`FuelType::category`] - the finer grouping shown in UI filters
//!
//! Unrecognized strings fall back to [`FuelType::Unrecognized`]; no substring
//! matching is performed.

use serde::{Deserialize, Serialize};

/// Fuel type as reported by the upstream inventory API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    Gasoline,
    GasolineCng,
    Diesel,
    GasElectricHybrid,
    GasolineElectricDrive,
    PlugInHybrid,
    ExtendedRange,
    DieselLightHybrid48v,
    GasolineMildHybrid48v,
    GasolineMildHybrid90v,
    PureElectric,
    /// Upstream value not in the known set
    Unrecognized,
}

/// Engine type for customs-duty purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineType {
    DieselOrGasoline,
    ElectricMotor,
}

/// Simplified fuel category for UI filters and listing cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelCategory {
    Gasoline,
    Diesel,
    Hybrid,
    Electric,
    Other,
}

impl FuelType {
    /// Map an upstream fuel string to the closed set
    ///
    /// Exact values first, then the handful of spelling aliases seen in the
    /// wild for electric vehicles. Anything else is `Unrecognized`.
    pub fn from_upstream(raw: &str) -> Self {
        match raw.trim() {
            "Gasoline" => Self::Gasoline,
            "Gasoline+CNG" => Self::GasolineCng,
            "Diesel Fuel" => Self::Diesel,
            "Gas-Electric Hybrid" => Self::GasElectricHybrid,
            "Gasoline Electric Drive" => Self::GasolineElectricDrive,
            "Plug-In Hybrid" => Self::PlugInHybrid,
            "Extended Range" => Self::ExtendedRange,
            "Diesel+48v Light Hybrid System" => Self::DieselLightHybrid48v,
            "Gasoline + 48v Mild Hybrid System" => Self::GasolineMildHybrid48v,
            "Gasoline +90v Mild Hybrid System" => Self::GasolineMildHybrid90v,
            "Pure Electric" => Self::PureElectric,
            other => match other.to_ascii_lowercase().as_str() {
                "pure electric" | "electric" | "ev" | "battery electric" => Self::PureElectric,
                "extended range" => Self::ExtendedRange,
                _ => Self::Unrecognized,
            },
        }
    }

    /// Engine type for duty calculation
    ///
    /// Extended-range vehicles are series hybrids: the combustion engine only
    /// charges the battery, so customs treats them as electric. Unrecognized
    /// values default to the combustion schedule.
    pub fn engine_type(&self) -> EngineType {
        match self {
            Self::PureElectric | Self::ExtendedRange => EngineType::ElectricMotor,
            _ => EngineType::DieselOrGasoline,
        }
    }

    /// Display category for UI filters
    ///
    /// Note the asymmetry with [`Self::engine_type`]: extended-range vehicles
    /// display as hybrids even though customs treats them as electric.
    pub fn category(&self) -> FuelCategory {
        match self {
            Self::Gasoline | Self::GasolineCng => FuelCategory::Gasoline,
            Self::Diesel => FuelCategory::Diesel,
            Self::GasElectricHybrid
            | Self::GasolineElectricDrive
            | Self::PlugInHybrid
            | Self::ExtendedRange
            | Self::DieselLightHybrid48v
            | Self::GasolineMildHybrid48v
            | Self::GasolineMildHybrid90v => FuelCategory::Hybrid,
            Self::PureElectric => FuelCategory::Electric,
            Self::Unrecognized => FuelCategory::Other,
        }
    }
}

impl FuelCategory {
    /// Russian label shown in UI filters
    pub fn label_ru(&self) -> &'static str {
        match self {
            Self::Gasoline => "Бензин",
            Self::Diesel => "Дизель",
            Self::Hybrid => "Гибрид",
            Self::Electric => "Электричество",
            Self::Other => "Другое",
        }
    }

    /// Upstream fuel strings belonging to this category (for filter queries)
    pub fn upstream_values(&self) -> &'static [&'static str] {
        match self {
            Self::Gasoline => &["Gasoline", "Gasoline+CNG"],
            Self::Diesel => &["Diesel Fuel"],
            Self::Hybrid => &[
                "Gas-Electric Hybrid",
                "Gasoline Electric Drive",
                "Plug-In Hybrid",
                "Extended Range",
                "Diesel+48v Light Hybrid System",
                "Gasoline + 48v Mild Hybrid System",
                "Gasoline +90v Mild Hybrid System",
            ],
            Self::Electric => &["Pure Electric"],
            Self::Other => &[],
        }
    }
}

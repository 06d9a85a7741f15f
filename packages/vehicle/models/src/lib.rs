#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Vehicle taxonomy types and the fixed consumption/emission constants.
//!
//! This crate defines the canonical vehicle category and fuel type
//! taxonomies used across the entire carbon-fleet system, along with the
//! average fuel economy and CO₂ emission factor assigned to each. Survey
//! answers carry the Spanish form labels, so lookups go through the
//! label-based constructors rather than serde.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Fuel economy assumed for a survey answer that names no known vehicle
/// category (km per liter).
pub const DEFAULT_ECONOMY_KM_PER_L: f64 = 10.0;

/// Emission factor assumed for a survey answer that names no known fuel
/// type (kg CO₂ per liter). Unknown fuels contribute nothing.
pub const DEFAULT_EMISSION_FACTOR_KG_PER_L: f64 = 0.0;

/// Vehicle categories recognized by the survey form.
///
/// Each category maps to a fixed average fuel economy. The strum
/// serializations are the exact labels the form presents to respondents.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleCategory {
    /// Compact passenger car (12 km/L)
    #[strum(serialize = "Automóvil pequeño")]
    SmallCar,
    /// SUV or crossover (10 km/L)
    #[strum(serialize = "SUV/Crossover")]
    SuvCrossover,
    /// Light truck / van (8 km/L)
    #[strum(serialize = "Camioneta")]
    LightTruck,
    /// Pickup truck (7 km/L)
    #[strum(serialize = "Pickup")]
    Pickup,
    /// Motorcycle (30 km/L)
    #[strum(serialize = "Moto")]
    Motorcycle,
}

impl VehicleCategory {
    /// Returns the average fuel economy for this category in km per liter.
    ///
    /// Every economy in this table is strictly positive; a zero economy
    /// would make the liters computation divide by zero and is rejected at
    /// table-definition time (see the `economies_are_positive` test).
    #[must_use]
    pub const fn economy_km_per_l(self) -> f64 {
        match self {
            Self::SmallCar => 12.0,
            Self::SuvCrossover => 10.0,
            Self::LightTruck => 8.0,
            Self::Pickup => 7.0,
            Self::Motorcycle => 30.0,
        }
    }

    /// Looks up a category from a raw survey answer (trimmed, exact label
    /// match). Returns `None` for blank or unrecognized answers.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        label.trim().parse().ok()
    }

    /// Resolves the fuel economy for a raw survey answer, falling back to
    /// [`DEFAULT_ECONOMY_KM_PER_L`] when the category is unknown.
    #[must_use]
    pub fn economy_for_label(label: &str) -> f64 {
        Self::from_label(label).map_or(DEFAULT_ECONOMY_KM_PER_L, Self::economy_km_per_l)
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::SmallCar,
            Self::SuvCrossover,
            Self::LightTruck,
            Self::Pickup,
            Self::Motorcycle,
        ]
    }
}

/// Fuel types recognized by the survey form.
///
/// Each fuel maps to a fixed emission factor in kg CO₂ per liter burned.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    /// Gasoline (2.31 kg CO₂/L)
    #[strum(serialize = "Gasolina")]
    Gasoline,
    /// Diesel (2.68 kg CO₂/L)
    #[strum(serialize = "Diésel")]
    Diesel,
    /// Hybrid (1.50 kg CO₂/L)
    #[strum(serialize = "Híbrido")]
    Hybrid,
    /// Electric (no tailpipe emissions)
    #[strum(serialize = "Eléctrico")]
    Electric,
}

impl FuelType {
    /// Returns the emission factor for this fuel in kg CO₂ per liter.
    #[must_use]
    pub const fn emission_factor_kg_per_l(self) -> f64 {
        match self {
            Self::Gasoline => 2.31,
            Self::Diesel => 2.68,
            Self::Hybrid => 1.50,
            Self::Electric => 0.0,
        }
    }

    /// Looks up a fuel type from a raw survey answer (trimmed, exact label
    /// match). Returns `None` for blank or unrecognized answers.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        label.trim().parse().ok()
    }

    /// Resolves the emission factor for a raw survey answer, falling back
    /// to [`DEFAULT_EMISSION_FACTOR_KG_PER_L`] when the fuel is unknown.
    #[must_use]
    pub fn emission_factor_for_label(label: &str) -> f64 {
        Self::from_label(label).map_or(
            DEFAULT_EMISSION_FACTOR_KG_PER_L,
            Self::emission_factor_kg_per_l,
        )
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Gasoline, Self::Diesel, Self::Hybrid, Self::Electric]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn economies_are_positive() {
        for category in VehicleCategory::all() {
            assert!(
                category.economy_km_per_l() > 0.0,
                "{category:?} has a non-positive economy; the liters \
                 computation would divide by zero"
            );
        }
    }

    #[test]
    fn economy_table_matches_survey_constants() {
        assert!((VehicleCategory::SmallCar.economy_km_per_l() - 12.0).abs() < f64::EPSILON);
        assert!((VehicleCategory::SuvCrossover.economy_km_per_l() - 10.0).abs() < f64::EPSILON);
        assert!((VehicleCategory::LightTruck.economy_km_per_l() - 8.0).abs() < f64::EPSILON);
        assert!((VehicleCategory::Pickup.economy_km_per_l() - 7.0).abs() < f64::EPSILON);
        assert!((VehicleCategory::Motorcycle.economy_km_per_l() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn emission_table_matches_survey_constants() {
        assert!((FuelType::Gasoline.emission_factor_kg_per_l() - 2.31).abs() < f64::EPSILON);
        assert!((FuelType::Diesel.emission_factor_kg_per_l() - 2.68).abs() < f64::EPSILON);
        assert!((FuelType::Hybrid.emission_factor_kg_per_l() - 1.50).abs() < f64::EPSILON);
        assert!(FuelType::Electric.emission_factor_kg_per_l().abs() < f64::EPSILON);
    }

    #[test]
    fn parses_form_labels() {
        assert_eq!(
            VehicleCategory::from_label("Automóvil pequeño"),
            Some(VehicleCategory::SmallCar)
        );
        assert_eq!(
            VehicleCategory::from_label("  Moto  "),
            Some(VehicleCategory::Motorcycle)
        );
        assert_eq!(FuelType::from_label("Diésel"), Some(FuelType::Diesel));
        assert_eq!(FuelType::from_label("Eléctrico"), Some(FuelType::Electric));
    }

    #[test]
    fn labels_round_trip_through_display() {
        for category in VehicleCategory::all() {
            assert_eq!(
                VehicleCategory::from_label(&category.to_string()),
                Some(*category)
            );
        }
        for fuel in FuelType::all() {
            assert_eq!(FuelType::from_label(&fuel.to_string()), Some(*fuel));
        }
    }

    #[test]
    fn unknown_labels_fall_back_to_defaults() {
        assert_eq!(VehicleCategory::from_label("Tractor"), None);
        assert!(
            (VehicleCategory::economy_for_label("Tractor") - DEFAULT_ECONOMY_KM_PER_L).abs()
                < f64::EPSILON
        );
        assert!((VehicleCategory::economy_for_label("") - DEFAULT_ECONOMY_KM_PER_L).abs() < f64::EPSILON);

        assert_eq!(FuelType::from_label("Hidrógeno"), None);
        assert!(FuelType::emission_factor_for_label("Hidrógeno").abs() < f64::EPSILON);
        assert!(FuelType::emission_factor_for_label("").abs() < f64::EPSILON);
    }

    #[test]
    fn labels_are_case_sensitive() {
        // The constants table is keyed by the exact form labels; lookups
        // must not silently match near-miss answers.
        assert_eq!(VehicleCategory::from_label("moto"), None);
        assert_eq!(FuelType::from_label("gasolina"), None);
    }
}

use std::fmt;
use std::str::FromStr;

use crate::error::RatingCurveError;

/// Default number of resampled stations (100 sections).
pub const DEFAULT_RESAMPLE_COUNT: usize = 101;

/// Station/value pairs along a cross-section.
///
/// Used both for the ground profile (values are elevations) and for the
/// roughness profile (values are Manning's n). The two are stationed
/// independently of each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub stations: Vec<f64>,
    pub values: Vec<f64>,
}

impl Profile {
    pub fn new(stations: Vec<f64>, values: Vec<f64>) -> Self {
        Self { stations, values }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// First and last station, if any. Meaningful once stations are validated as increasing.
    pub fn station_range(&self) -> Option<(f64, f64)> {
        Some((*self.stations.first()?, *self.stations.last()?))
    }
}

/// Unit system for Manning's equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    /// US customary (ft, ft³/s).
    #[default]
    En,
    /// Metric (m, m³/s).
    Si,
}

impl UnitSystem {
    /// Manning coefficient Kn.
    pub fn manning_coefficient(self) -> f64 {
        match self {
            UnitSystem::En => 1.486,
            UnitSystem::Si => 1.0,
        }
    }
}

impl FromStr for UnitSystem {
    type Err = RatingCurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EN" => Ok(UnitSystem::En),
            "SI" => Ok(UnitSystem::Si),
            other => Err(RatingCurveError::UnitSystem(other.to_string())),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::En => f.write_str("EN"),
            UnitSystem::Si => f.write_str("SI"),
        }
    }
}

/// Scalar parameters of one rating-curve computation.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingCurveConfig {
    /// Freeboard added above the highest profile elevation.
    pub overboard: f64,
    /// Longitudinal channel slope.
    pub slope: f64,
    /// Points on the output rating curve.
    pub number_of_stages: usize,
    /// Resolution of the uniform resampling grid.
    ///
    /// A section only counts as wetted when both of its ends are below the stage,
    /// so area and perimeter are underestimated at the waterline. The bias shrinks
    /// as this grows.
    pub resample_count: usize,
    pub units: UnitSystem,
}

impl Default for RatingCurveConfig {
    fn default() -> Self {
        Self {
            overboard: 0.0,
            slope: 0.0,
            number_of_stages: 0,
            resample_count: DEFAULT_RESAMPLE_COUNT,
            units: UnitSystem::default(),
        }
    }
}

impl RatingCurveConfig {
    pub fn new(slope: f64, number_of_stages: usize) -> Self {
        Self {
            slope,
            number_of_stages,
            ..Self::default()
        }
    }

    pub fn with_overboard(mut self, overboard: f64) -> Self {
        self.overboard = overboard;
        self
    }

    pub fn with_resample_count(mut self, resample_count: usize) -> Self {
        self.resample_count = resample_count;
        self
    }

    pub fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }
}

/// The cross-section on a uniform station grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledProfile {
    pub stations: Vec<f64>,
    pub elevations: Vec<f64>,
    pub roughness: Vec<f64>,
    /// Spacing applied to every section, computed once from the input station range.
    pub dx: f64,
}

impl ResampledProfile {
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }
}

/// One row of a rating curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageRecord {
    pub stage: f64,
    pub discharge: f64,
    pub area: f64,
    pub wetted_perimeter: f64,
}

/// Stage records in ascending stage order, plus the resampled profile they were computed on.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingCurve {
    pub records: Vec<StageRecord>,
    pub resampled: ResampledProfile,
}

impl RatingCurve {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stages(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.stage).collect()
    }

    pub fn discharges(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.discharge).collect()
    }

    pub fn areas(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.area).collect()
    }

    pub fn wetted_perimeters(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.wetted_perimeter).collect()
    }

    pub fn resampled_stations(&self) -> &[f64] {
        &self.resampled.stations
    }

    pub fn resampled_elevations(&self) -> &[f64] {
        &self.resampled.elevations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_system_parsing() {
        assert_eq!("EN".parse::<UnitSystem>().unwrap(), UnitSystem::En);
        assert_eq!("SI".parse::<UnitSystem>().unwrap(), UnitSystem::Si);

        for token in ["en", "si", "", "SI ", "metric"] {
            let err = token.parse::<UnitSystem>().unwrap_err();
            assert_eq!(err, RatingCurveError::UnitSystem(token.to_string()));
        }
    }

    #[test]
    fn test_manning_coefficient() {
        assert_eq!(UnitSystem::En.manning_coefficient(), 1.486);
        assert_eq!(UnitSystem::Si.manning_coefficient(), 1.0);
        assert_eq!(UnitSystem::En.to_string(), "EN");
    }

    #[test]
    fn test_config_defaults() {
        let config = RatingCurveConfig::new(0.001, 10)
            .with_overboard(0.5)
            .with_units(UnitSystem::Si);
        assert_eq!(config.resample_count, DEFAULT_RESAMPLE_COUNT);
        assert_eq!(config.overboard, 0.5);
        assert_eq!(config.units, UnitSystem::Si);
        assert_eq!(config.number_of_stages, 10);
    }
}

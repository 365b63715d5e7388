use std::fmt;

use thiserror::Error;

/// Which input profile an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    CrossSection,
    Roughness,
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileKind::CrossSection => f.write_str("cross-section"),
            ProfileKind::Roughness => f.write_str("roughness"),
        }
    }
}

/// Input defects rejected before or during rating-curve generation.
///
/// Every variant is deterministic: retrying with the same input fails the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RatingCurveError {
    /// Paired station/value arrays differ in length.
    #[error("{profile} profile has {stations} stations but {values} values")]
    ShapeMismatch {
        profile: ProfileKind,
        stations: usize,
        values: usize,
    },

    /// A station sequence is not strictly increasing.
    #[error(
        "{profile} profile stations must be strictly increasing: station[{index}] = {current} follows {previous}"
    )]
    Monotonicity {
        profile: ProfileKind,
        index: usize,
        previous: f64,
        current: f64,
    },

    /// A scalar parameter or roughness value is out of its admissible range.
    #[error("{name} must be {requirement}, got {value}")]
    ParameterRange {
        name: &'static str,
        requirement: &'static str,
        value: f64,
    },

    /// Unit token other than `EN` or `SI`.
    #[error("unit system must be either EN or SI, got {0:?}")]
    UnitSystem(String),

    /// The resampled grid reaches outside a profile's station range.
    #[error(
        "resampled station {station} lies outside the {profile} profile domain [{min}, {max}]"
    )]
    InterpolationDomain {
        profile: ProfileKind,
        station: f64,
        min: f64,
        max: f64,
    },
}

pub type Result<T> = std::result::Result<T, RatingCurveError>;

//! Stage-discharge rating curves for open-channel cross-sections.
//!
//! The cross-section and its Manning's n profile are resampled onto a uniform
//! station grid, wetted area and perimeter are accumulated for each stage over
//! the fully submerged sections, and discharge follows from Manning's equation.

pub mod discharge;
pub mod error;
pub mod model;
pub mod nodata;
pub mod parser;
pub mod progress;
pub mod rating;
pub mod resample;
pub mod sweep;
pub mod validate;
pub mod writer;

pub use error::{ProfileKind, RatingCurveError, Result};
pub use model::{
    Profile, RatingCurve, RatingCurveConfig, ResampledProfile, StageRecord, UnitSystem,
    DEFAULT_RESAMPLE_COUNT,
};
pub use rating::{
    generate_rating_curve, generate_rating_curve_serial, generate_rating_curve_with_progress,
};
pub use writer::{ColorMap, ColorMapWriter};

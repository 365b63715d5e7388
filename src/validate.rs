use crate::error::{ProfileKind, RatingCurveError, Result};
use crate::model::{Profile, RatingCurveConfig};

/// Checks the inputs of a rating-curve computation, failing on the first violated rule.
///
/// Rules run in a fixed order: shapes, station monotonicity, roughness/slope/stage
/// count ranges, then the remaining size and finiteness constraints. Later
/// stages of the pipeline assume all of them hold.
pub fn validate_inputs(
    cross_section: &Profile,
    roughness: &Profile,
    config: &RatingCurveConfig,
) -> Result<()> {
    check_shape(cross_section, ProfileKind::CrossSection)?;
    check_shape(roughness, ProfileKind::Roughness)?;

    check_strictly_increasing(&cross_section.stations, ProfileKind::CrossSection)?;
    check_strictly_increasing(&roughness.stations, ProfileKind::Roughness)?;

    if let Some(&n) = roughness.values.iter().find(|&&n| !(n > 0.0)) {
        return Err(range("Manning's n", "greater than zero", n));
    }
    if !(config.slope > 0.0) {
        return Err(range("slope", "greater than zero", config.slope));
    }
    if config.number_of_stages == 0 {
        return Err(range("number of stages", "greater than zero", 0.0));
    }

    if cross_section.len() < 2 {
        return Err(range(
            "cross-section point count",
            "at least 2",
            cross_section.len() as f64,
        ));
    }
    if roughness.len() < 2 {
        return Err(range(
            "roughness point count",
            "at least 2",
            roughness.len() as f64,
        ));
    }
    if config.resample_count < 2 {
        return Err(range(
            "resample count",
            "at least 2",
            config.resample_count as f64,
        ));
    }
    if !(config.overboard >= 0.0) || !config.overboard.is_finite() {
        return Err(range(
            "overboard",
            "finite and non-negative",
            config.overboard,
        ));
    }
    if let Some(&x) = cross_section
        .stations
        .iter()
        .chain(&roughness.stations)
        .find(|x| !x.is_finite())
    {
        return Err(range("station", "finite", x));
    }
    if let Some(&z) = cross_section.values.iter().find(|z| !z.is_finite()) {
        return Err(range("cross-section elevation", "finite", z));
    }
    // Discharge for stage i reads the resampled roughness at index i.
    if config.number_of_stages > config.resample_count {
        return Err(range(
            "number of stages",
            "no greater than the resample count",
            config.number_of_stages as f64,
        ));
    }

    Ok(())
}

fn check_shape(profile: &Profile, kind: ProfileKind) -> Result<()> {
    if profile.stations.len() != profile.values.len() {
        return Err(RatingCurveError::ShapeMismatch {
            profile: kind,
            stations: profile.stations.len(),
            values: profile.values.len(),
        });
    }
    Ok(())
}

fn check_strictly_increasing(stations: &[f64], kind: ProfileKind) -> Result<()> {
    for (i, pair) in stations.windows(2).enumerate() {
        if !(pair[0] < pair[1]) {
            return Err(RatingCurveError::Monotonicity {
                profile: kind,
                index: i + 1,
                previous: pair[0],
                current: pair[1],
            });
        }
    }
    Ok(())
}

fn range(name: &'static str, requirement: &'static str, value: f64) -> RatingCurveError {
    RatingCurveError::ParameterRange {
        name,
        requirement,
        value,
    }
}

use tracing::debug;

use crate::error::{ProfileKind, RatingCurveError, Result};
use crate::model::{Profile, ResampledProfile};

/// `count` evenly spaced values from `start` to `stop`, both ends included.
///
/// The last value is exactly `stop`; a single-element grid is `[start]`.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        stop
                    } else {
                        start + i as f64 * step
                    }
                })
                .collect()
        }
    }
}

/// Piecewise-linear interpolant through a validated profile. Never extrapolates.
#[derive(Debug, Clone, Copy)]
pub struct LinearInterpolator<'a> {
    stations: &'a [f64],
    values: &'a [f64],
    kind: ProfileKind,
}

impl<'a> LinearInterpolator<'a> {
    /// `profile` should have at least two strictly increasing stations; shorter
    /// profiles fail on every lookup.
    pub fn new(profile: &'a Profile, kind: ProfileKind) -> Self {
        Self {
            stations: &profile.stations,
            values: &profile.values,
            kind,
        }
    }

    pub fn interpolate(&self, x: f64) -> Result<f64> {
        let n = self.stations.len();
        if self.values.len() != n {
            return Err(RatingCurveError::ShapeMismatch {
                profile: self.kind,
                stations: n,
                values: self.values.len(),
            });
        }
        let (min, max) = match (self.stations.first(), self.stations.last()) {
            (Some(&min), Some(&max)) if n >= 2 => (min, max),
            _ => return Err(too_few_points(self.kind, n)),
        };
        if !(x >= min && x <= max) {
            return Err(RatingCurveError::InterpolationDomain {
                profile: self.kind,
                station: x,
                min,
                max,
            });
        }

        // First station >= x, kept off the ends so [hi - 1, hi] is always a segment.
        let hi = self.stations.partition_point(|&s| s < x).clamp(1, n - 1);
        let lo = hi - 1;

        let slope =
            (self.values[hi] - self.values[lo]) / (self.stations[hi] - self.stations[lo]);
        Ok(slope * (x - self.stations[lo]) + self.values[lo])
    }

    pub fn interpolate_all(&self, xs: &[f64]) -> Result<Vec<f64>> {
        xs.iter().map(|&x| self.interpolate(x)).collect()
    }
}

/// Resamples the cross-section and roughness onto `count` stations over `[0, max station]`.
///
/// Inputs are expected to be validated, though profiles with fewer than two
/// points and counts below two are still rejected here. The grid starts at station zero
/// regardless of the first surveyed station, and `dx` is derived from the
/// surveyed station range rather than from the grid.
pub fn resample_profile(
    cross_section: &Profile,
    roughness: &Profile,
    count: usize,
) -> Result<ResampledProfile> {
    if count < 2 {
        return Err(RatingCurveError::ParameterRange {
            name: "resample count",
            requirement: "at least 2",
            value: count as f64,
        });
    }
    let (min_station, max_station) = cross_section
        .station_range()
        .filter(|_| cross_section.len() >= 2)
        .ok_or_else(|| too_few_points(ProfileKind::CrossSection, cross_section.len()))?;
    roughness
        .station_range()
        .filter(|_| roughness.len() >= 2)
        .ok_or_else(|| too_few_points(ProfileKind::Roughness, roughness.len()))?;

    let stations = linspace(0.0, max_station, count);
    let dx = (max_station - min_station) / (count - 1) as f64;

    let elevations = LinearInterpolator::new(cross_section, ProfileKind::CrossSection)
        .interpolate_all(&stations)?;
    let roughness = LinearInterpolator::new(roughness, ProfileKind::Roughness)
        .interpolate_all(&stations)?;

    debug!(
        "Resampled profile: {} stations over [0, {}], dx = {}",
        count, max_station, dx
    );

    Ok(ResampledProfile {
        stations,
        elevations,
        roughness,
        dx,
    })
}

fn too_few_points(kind: ProfileKind, len: usize) -> RatingCurveError {
    RatingCurveError::ParameterRange {
        name: match kind {
            ProfileKind::CrossSection => "cross-section point count",
            ProfileKind::Roughness => "roughness point count",
        },
        requirement: "at least 2",
        value: len as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
        assert_eq!(linspace(2.0, 7.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());

        let grid = linspace(0.0, 10.0, 101);
        assert_eq!(grid.len(), 101);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[100], 10.0);
        assert!((grid[37] - 3.7).abs() < 1e-12);
    }

    #[test]
    fn test_interpolation_hits_nodes_and_midpoints() {
        let profile = Profile::new(vec![0.0, 2.0, 6.0], vec![4.0, 0.0, 2.0]);
        let interp = LinearInterpolator::new(&profile, ProfileKind::CrossSection);

        assert_eq!(interp.interpolate(0.0).unwrap(), 4.0);
        assert_eq!(interp.interpolate(2.0).unwrap(), 0.0);
        assert_eq!(interp.interpolate(6.0).unwrap(), 2.0);
        assert_eq!(interp.interpolate(1.0).unwrap(), 2.0);
        assert_eq!(interp.interpolate(4.0).unwrap(), 1.0);
    }

    #[test]
    fn test_interpolation_never_extrapolates() {
        let profile = Profile::new(vec![1.0, 3.0], vec![0.02, 0.04]);
        let interp = LinearInterpolator::new(&profile, ProfileKind::Roughness);

        let err = interp.interpolate(0.5).unwrap_err();
        assert_eq!(
            err,
            RatingCurveError::InterpolationDomain {
                profile: ProfileKind::Roughness,
                station: 0.5,
                min: 1.0,
                max: 3.0,
            }
        );
        assert!(interp.interpolate(3.0 + 1e-9).is_err());
        assert!(interp.interpolate(f64::NAN).is_err());
    }

    #[test]
    fn test_resample_v_channel() {
        let xs = Profile::new(vec![0.0, 5.0, 10.0], vec![1.0, 0.0, 1.0]);
        let n = Profile::new(vec![0.0, 10.0], vec![0.03, 0.05]);

        let resampled = resample_profile(&xs, &n, 11).unwrap();
        assert_eq!(resampled.len(), 11);
        assert_eq!(resampled.section_count(), 10);
        assert!((resampled.dx - 1.0).abs() < 1e-15);
        assert_eq!(resampled.elevations[5], 0.0);
        assert!((resampled.elevations[2] - 0.6).abs() < 1e-12);
        assert!((resampled.roughness[5] - 0.04).abs() < 1e-12);
        assert!((resampled.roughness[10] - 0.05).abs() < 1e-15);
    }

    #[test]
    fn test_roughness_must_cover_grid() {
        let xs = Profile::new(vec![0.0, 5.0, 10.0], vec![1.0, 0.0, 1.0]);
        let n = Profile::new(vec![0.0, 8.0], vec![0.03, 0.03]);

        let err = resample_profile(&xs, &n, 11).unwrap_err();
        assert!(matches!(
            err,
            RatingCurveError::InterpolationDomain {
                profile: ProfileKind::Roughness,
                max,
                ..
            } if max == 8.0
        ));
    }

    #[test]
    fn test_grid_starts_at_station_zero() {
        // Survey starting past zero leaves the grid origin uncovered.
        let xs = Profile::new(vec![2.0, 5.0, 10.0], vec![1.0, 0.0, 1.0]);
        let n = Profile::new(vec![0.0, 10.0], vec![0.03, 0.03]);

        let err = resample_profile(&xs, &n, 11).unwrap_err();
        assert!(matches!(
            err,
            RatingCurveError::InterpolationDomain {
                profile: ProfileKind::CrossSection,
                station,
                ..
            } if station == 0.0
        ));
    }

    #[test]
    fn test_short_profiles_fail_without_panicking() {
        let empty = Profile::new(Vec::new(), Vec::new());
        let single = Profile::new(vec![3.0], vec![0.03]);
        for profile in [&empty, &single] {
            let interp = LinearInterpolator::new(profile, ProfileKind::Roughness);
            assert_eq!(
                interp.interpolate(3.0).unwrap_err(),
                RatingCurveError::ParameterRange {
                    name: "roughness point count",
                    requirement: "at least 2",
                    value: profile.len() as f64,
                }
            );
        }

        let xs = Profile::new(vec![0.0, 5.0, 10.0], vec![1.0, 0.0, 1.0]);
        assert_eq!(
            resample_profile(&xs, &empty, 11).unwrap_err(),
            RatingCurveError::ParameterRange {
                name: "roughness point count",
                requirement: "at least 2",
                value: 0.0,
            }
        );
        assert!(matches!(
            resample_profile(&empty, &single, 11),
            Err(RatingCurveError::ParameterRange {
                name: "cross-section point count",
                ..
            })
        ));
    }

    #[test]
    fn test_resample_count_below_two_rejected() {
        let xs = Profile::new(vec![0.0, 5.0, 10.0], vec![1.0, 0.0, 1.0]);
        let n = Profile::new(vec![0.0, 10.0], vec![0.03, 0.03]);

        for count in [0, 1] {
            assert_eq!(
                resample_profile(&xs, &n, count).unwrap_err(),
                RatingCurveError::ParameterRange {
                    name: "resample count",
                    requirement: "at least 2",
                    value: count as f64,
                }
            );
        }
        assert!(resample_profile(&xs, &n, 2).unwrap().dx.is_finite());
    }
}

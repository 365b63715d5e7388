use rayon::prelude::*;
use tracing::debug;

use crate::discharge::manning_discharge;
use crate::error::Result;
use crate::model::{Profile, RatingCurve, RatingCurveConfig, ResampledProfile, StageRecord};
use crate::resample::resample_profile;
use crate::sweep::{stage_grid, wetted_geometry};
use crate::validate::validate_inputs;

/// Computes a stage-discharge rating curve, evaluating stages in parallel.
///
/// Records come back in ascending stage order and are bit-identical to
/// [`generate_rating_curve_serial`].
pub fn generate_rating_curve(
    cross_section: &Profile,
    roughness: &Profile,
    config: &RatingCurveConfig,
) -> Result<RatingCurve> {
    let (resampled, stages) = prepare(cross_section, roughness, config)?;

    let records = stages
        .par_iter()
        .enumerate()
        .map(|(i, &stage)| evaluate_stage(&resampled, i, stage, config))
        .collect();

    Ok(RatingCurve { records, resampled })
}

/// Single-threaded variant of [`generate_rating_curve`].
pub fn generate_rating_curve_serial(
    cross_section: &Profile,
    roughness: &Profile,
    config: &RatingCurveConfig,
) -> Result<RatingCurve> {
    generate_rating_curve_with_progress(cross_section, roughness, config, |_, _| {})
}

/// Serial evaluation calling `progress(index, total)` after each stage.
pub fn generate_rating_curve_with_progress<F>(
    cross_section: &Profile,
    roughness: &Profile,
    config: &RatingCurveConfig,
    mut progress: F,
) -> Result<RatingCurve>
where
    F: FnMut(usize, usize),
{
    let (resampled, stages) = prepare(cross_section, roughness, config)?;

    let total = stages.len();
    let mut records = Vec::with_capacity(total);
    for (i, &stage) in stages.iter().enumerate() {
        records.push(evaluate_stage(&resampled, i, stage, config));
        progress(i, total);
    }

    Ok(RatingCurve { records, resampled })
}

fn prepare(
    cross_section: &Profile,
    roughness: &Profile,
    config: &RatingCurveConfig,
) -> Result<(ResampledProfile, Vec<f64>)> {
    validate_inputs(cross_section, roughness, config)?;

    let resampled = resample_profile(cross_section, roughness, config.resample_count)?;
    let stages = stage_grid(
        &cross_section.values,
        config.overboard,
        config.number_of_stages,
    );

    debug!(
        "Evaluating {} stages from {:?} to {:?} ({} units)",
        stages.len(),
        stages.first(),
        stages.last(),
        config.units
    );

    Ok((resampled, stages))
}

/// Uses the resampled roughness at the stage's own index, not a wetted-weighted average.
fn evaluate_stage(
    resampled: &ResampledProfile,
    index: usize,
    stage: f64,
    config: &RatingCurveConfig,
) -> StageRecord {
    let geometry = wetted_geometry(resampled, stage);
    let discharge = manning_discharge(
        &geometry,
        resampled.roughness[index],
        config.slope,
        config.units,
    );

    StageRecord {
        stage,
        discharge,
        area: geometry.area,
        wetted_perimeter: geometry.perimeter,
    }
}

use crate::model::ResampledProfile;
use crate::resample::linspace;

/// Wetted geometry of the resampled cross-section at one stage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WettedGeometry {
    pub area: f64,
    pub perimeter: f64,
    pub wetted_sections: usize,
}

impl WettedGeometry {
    pub fn is_dry(&self) -> bool {
        self.wetted_sections == 0
    }
}

/// Stage grid from the lowest elevation up to the highest plus freeboard.
pub fn stage_grid(elevations: &[f64], overboard: f64, number_of_stages: usize) -> Vec<f64> {
    let z_min = elevations.iter().copied().fold(f64::INFINITY, f64::min);
    let z_max = elevations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    linspace(z_min, z_max + overboard, number_of_stages)
}

/// Accumulates area and wetted perimeter over the fully submerged sections.
///
/// A section is wetted only when both of its ends lie strictly below `stage`;
/// sections straddling the waterline contribute nothing.
pub fn wetted_geometry(profile: &ResampledProfile, stage: f64) -> WettedGeometry {
    let dx = profile.dx;
    let mut geometry = WettedGeometry::default();

    for section in profile.elevations.windows(2) {
        let (z0, z1) = (section[0], section[1]);
        if z0 < stage && z1 < stage {
            geometry.area += 0.5 * ((stage - z0) + (stage - z1)) * dx;
            geometry.perimeter += (dx.powi(2) + (z0 - z1).powi(2)).sqrt();
            geometry.wetted_sections += 1;
        }
    }

    geometry
}

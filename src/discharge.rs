use crate::model::UnitSystem;
use crate::sweep::WettedGeometry;

/// Manning's equation: `Q = (Kn / n) * A * (A / P)^(2/3) * sqrt(S)`.
///
/// A dry cross-section yields exactly zero without touching the perimeter.
pub fn manning_discharge(
    geometry: &WettedGeometry,
    manning_n: f64,
    slope: f64,
    units: UnitSystem,
) -> f64 {
    if geometry.is_dry() || geometry.area <= 0.0 {
        return 0.0;
    }

    let hydraulic_radius = geometry.area / geometry.perimeter;
    units.manning_coefficient() / manning_n
        * geometry.area
        * hydraulic_radius.powf(2.0 / 3.0)
        * slope.sqrt()
}

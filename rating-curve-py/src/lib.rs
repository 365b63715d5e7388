use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use rating_curve::progress;
use rating_curve::{ColorMap, ColorMapWriter, Profile, RatingCurveConfig, UnitSystem};
use std::io;
use std::path::Path;

type RatingCurveTuple = (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>);

#[pymodule]
#[pyo3(name = "rating_curve")]
fn rating_curve_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(
        generate_rating_curve_based_on_mannings_equation,
        m
    )?)?;
    m.add_function(wrap_pyfunction!(generate_custom_paraview_color_map, m)?)?;
    m.add_function(wrap_pyfunction!(print_progress_bar, m)?)?;
    Ok(())
}

/// Returns `(stage, Q, area, pwet, station_resample, z_resample)`.
#[pyfunction]
#[pyo3(signature = (
    station_profile,
    zprofile,
    overboard,
    station_manning_n,
    manning_n,
    slope,
    number_of_rc_points,
    n_resample=101,
    units="EN"
))]
#[allow(clippy::too_many_arguments)]
pub fn generate_rating_curve_based_on_mannings_equation(
    py: Python<'_>,
    station_profile: Vec<f64>,
    zprofile: Vec<f64>,
    overboard: f64,
    station_manning_n: Vec<f64>,
    manning_n: Vec<f64>,
    slope: f64,
    number_of_rc_points: usize,
    n_resample: usize,
    units: &str,
) -> PyResult<RatingCurveTuple> {
    let units: UnitSystem = units
        .parse()
        .map_err(|e| PyErr::new::<PyValueError, _>(format!("{}", e)))?;

    let cross_section = Profile::new(station_profile, zprofile);
    let roughness = Profile::new(station_manning_n, manning_n);
    let config = RatingCurveConfig::new(slope, number_of_rc_points)
        .with_overboard(overboard)
        .with_resample_count(n_resample)
        .with_units(units);

    let curve = py
        .allow_threads(|| rating_curve::generate_rating_curve(&cross_section, &roughness, &config))
        .map_err(|e| {
            PyErr::new::<PyValueError, _>(format!("Failed to generate rating curve: {}", e))
        })?;

    Ok((
        curve.stages(),
        curve.discharges(),
        curve.areas(),
        curve.wetted_perimeters(),
        curve.resampled.stations,
        curve.resampled.elevations,
    ))
}

/// Writes `<name>_colormaps.xml` into `directory` and returns its path.
#[pyfunction]
#[pyo3(signature = (color_map_name, values, r, g, b, directory="."))]
pub fn generate_custom_paraview_color_map(
    color_map_name: &str,
    values: Vec<f64>,
    r: Vec<f64>,
    g: Vec<f64>,
    b: Vec<f64>,
    directory: &str,
) -> PyResult<String> {
    let color_map = ColorMap::from_arrays(color_map_name, &values, &r, &g, &b)
        .map_err(|e| PyErr::new::<PyValueError, _>(format!("{}", e)))?;

    let path = ColorMapWriter::new()
        .write(&color_map, Path::new(directory))
        .map_err(|e| {
            PyErr::new::<PyIOError, _>(format!("Failed to write color map: {:#}", e))
        })?;

    Ok(path.display().to_string())
}

#[pyfunction]
pub fn print_progress_bar(i: usize, total: usize, post_text: &str) -> PyResult<()> {
    progress::print_progress_bar(&mut io::stdout(), i, total, post_text)
        .map_err(|e| PyErr::new::<PyIOError, _>(format!("Failed to print progress: {}", e)))
}

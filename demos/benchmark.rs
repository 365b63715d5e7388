use std::time::Instant;
use anyhow::Result;
use rating_curve::{
    generate_rating_curve, generate_rating_curve_serial, Profile, RatingCurveConfig, UnitSystem,
};

fn main() -> Result<()> {
    // Resample and stage counts from the environment
    let resample_count: usize = std::env::var("RESAMPLE_COUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(20_001);
    let stages: usize = std::env::var("STAGES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(2_000);

    // Compound channel: main channel plus floodplains
    let cross_section = Profile::new(
        vec![0.0, 20.0, 35.0, 40.0, 50.0, 55.0, 70.0, 90.0],
        vec![6.0, 4.0, 3.8, 1.0, 0.0, 1.2, 4.1, 6.5],
    );
    let roughness = Profile::new(
        vec![0.0, 38.0, 57.0, 90.0],
        vec![0.06, 0.035, 0.035, 0.06],
    );
    let config = RatingCurveConfig::new(0.0008, stages)
        .with_overboard(1.0)
        .with_resample_count(resample_count)
        .with_units(UnitSystem::Si);

    println!(
        "Benchmarking rating curve: {} stages x {} resampled stations",
        stages, resample_count
    );

    // Single thread
    let start = Instant::now();
    let serial = generate_rating_curve_serial(&cross_section, &roughness, &config)?;
    let serial_duration = start.elapsed();
    println!("Serial:   {:?}", serial_duration);

    // Parallel (rayon)
    let start = Instant::now();
    let parallel = generate_rating_curve(&cross_section, &roughness, &config)?;
    let parallel_duration = start.elapsed();
    println!("Parallel: {:?}", parallel_duration);

    println!(
        "Speedup: {:.2}x, identical output: {}",
        serial_duration.as_secs_f64() / parallel_duration.as_secs_f64(),
        serial == parallel
    );

    if let Some(last) = parallel.records.last() {
        println!("Top of curve:");
        println!("  Stage: {}", last.stage);
        println!("  Discharge: {}", last.discharge);
        println!("  Area: {}", last.area);
        println!("  Wetted perimeter: {}", last.wetted_perimeter);
    }

    Ok(())
}

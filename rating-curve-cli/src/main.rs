use anyhow::Result;
use clap::{Parser, Subcommand};
use rayon::ThreadPoolBuilder;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rating_curve::parser::read_profile;
use rating_curve::progress::print_progress_bar;
use rating_curve::writer::table::{write_rating_curve, write_rating_curve_to};
use rating_curve::{
    generate_rating_curve, generate_rating_curve_with_progress, ColorMap, ColorMapWriter,
    RatingCurveConfig, UnitSystem, DEFAULT_RESAMPLE_COUNT,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a stage-discharge rating curve with Manning's equation
    Rate(RateArgs),

    /// Write a ParaView color map from breakpoints and RGB components in [0, 1]
    Colormap {
        /// Color map name (also the output file prefix)
        name: String,

        /// Breakpoint values
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<f64>,

        #[arg(long, value_delimiter = ',', required = true)]
        red: Vec<f64>,

        #[arg(long, value_delimiter = ',', required = true)]
        green: Vec<f64>,

        #[arg(long, value_delimiter = ',', required = true)]
        blue: Vec<f64>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },

    /// Write the HEC-RAS water depth palette as a ParaView color map
    ColormapPreset {
        /// Depth mapped to the darkest color
        #[arg(long)]
        max_depth: f64,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },

    /// Compose a terrain VRT from several rasters (requires the `mosaic` feature)
    Mosaic {
        /// Output VRT file
        vrt: PathBuf,

        /// Source GeoTIFF files
        #[arg(required = true)]
        sources: Vec<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct RateArgs {
    /// Cross-section profile CSV (station, elevation)
    #[arg(value_name = "PROFILE")]
    profile: PathBuf,

    /// Manning's n profile CSV (station, n)
    #[arg(value_name = "ROUGHNESS")]
    roughness: PathBuf,

    /// Longitudinal channel slope
    #[arg(long)]
    slope: f64,

    /// Number of points on the rating curve
    #[arg(long)]
    stages: usize,

    /// Height above the highest profile point to extend the curve to
    #[arg(long, default_value_t = 0.0)]
    overboard: f64,

    /// Resampling resolution of the cross-section
    #[arg(long, default_value_t = DEFAULT_RESAMPLE_COUNT)]
    resample_count: usize,

    /// Unit system (EN or SI)
    #[arg(long, default_value = "EN")]
    units: String,

    /// Output CSV file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Evaluate stages one by one with a progress bar
    #[arg(long)]
    progress: bool,
}

fn main() -> Result<()> {
    // Logging to stderr, stdout carries the table
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // Start of processing
    let start_time = std::time::Instant::now();

    match args.command {
        Command::Rate(rate) => run_rate(&rate)?,
        Command::Colormap {
            name,
            values,
            red,
            green,
            blue,
            output,
        } => {
            let color_map = ColorMap::from_arrays(name, &values, &red, &green, &blue)?;
            write_color_map(&color_map, &output)?;
        }
        Command::ColormapPreset { max_depth, output } => {
            if !(max_depth > 0.0) {
                anyhow::bail!("--max-depth must be greater than zero");
            }
            write_color_map(&ColorMap::hec_ras_water_depth(max_depth), &output)?;
        }
        Command::Mosaic { vrt, sources } => build_mosaic(&vrt, &sources)?,
    }

    // Total time
    let elapsed = start_time.elapsed();
    info!("Total processing time: {:?}", elapsed);

    Ok(())
}

fn run_rate(args: &RateArgs) -> Result<()> {
    // Thread pool
    if let Some(threads) = args.threads {
        ThreadPoolBuilder::new().num_threads(threads).build_global()?;
    }

    // Unit token first, then the two profiles
    let units: UnitSystem = args.units.parse()?;
    let cross_section = read_profile(&args.profile)?;
    let roughness = read_profile(&args.roughness)?;
    info!(
        "Loaded {} profile points and {} roughness points",
        cross_section.len(),
        roughness.len()
    );

    let config = RatingCurveConfig::new(args.slope, args.stages)
        .with_overboard(args.overboard)
        .with_resample_count(args.resample_count)
        .with_units(units);

    // Sequential with a progress bar, otherwise parallel
    let curve = if args.progress {
        let mut stderr = io::stderr();
        let curve = generate_rating_curve_with_progress(
            &cross_section,
            &roughness,
            &config,
            |i, total| {
                // A closed terminal should not abort the computation.
                let _ = print_progress_bar(&mut stderr, i, total, &format!("stage {}", i + 1));
            },
        )?;
        eprintln!();
        curve
    } else {
        generate_rating_curve(&cross_section, &roughness, &config)?
    };

    if let Some(last) = curve.records.last() {
        info!(
            "Rating curve: {} stages up to {} (Q = {})",
            curve.len(),
            last.stage,
            last.discharge
        );
    }

    // Table to a file or stdout
    match &args.output {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            write_rating_curve(&curve, path)?;
        }
        None => write_rating_curve_to(&curve, io::stdout().lock())?,
    }

    Ok(())
}

fn write_color_map(color_map: &ColorMap, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    let path = ColorMapWriter::new().write(color_map, dir)?;
    info!("Color map written: {:?}", path);
    Ok(())
}

#[cfg(feature = "mosaic")]
fn build_mosaic(vrt: &Path, sources: &[PathBuf]) -> Result<()> {
    info!("Building VRT from {} rasters", sources.len());
    rating_curve::writer::build_vrt(vrt, sources)
}

#[cfg(not(feature = "mosaic"))]
fn build_mosaic(vrt: &Path, _sources: &[PathBuf]) -> Result<()> {
    anyhow::bail!(
        "Cannot build {}: rating-curve was built without the `mosaic` feature",
        vrt.display()
    )
}

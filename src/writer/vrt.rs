use anyhow::{ensure, Context, Result};
use gdal::programs::raster::build_vrt as gdal_build_vrt;
use gdal::Dataset;
use std::path::{Path, PathBuf};

/// Composes a terrain VRT from several GeoTIFFs, like `gdalbuildvrt result.vrt *.tif`.
///
/// GDAL releases before 2.3.3 cannot read BigTIFF sources.
pub fn build_vrt(vrt_path: &Path, sources: &[PathBuf]) -> Result<()> {
    ensure!(
        !sources.is_empty(),
        "No source rasters given for {}",
        vrt_path.display()
    );

    // Open every source up front
    let datasets = sources
        .iter()
        .map(|path| {
            Dataset::open(path)
                .with_context(|| format!("Failed to open source raster: {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let vrt = gdal_build_vrt(Some(vrt_path), &datasets, None)
        .with_context(|| format!("Failed to build VRT: {}", vrt_path.display()))?;
    // The descriptor is flushed to disk when the dataset closes.
    drop(vrt);

    tracing::info!(
        "Written VRT from {} sources: {:?}",
        datasets.len(),
        vrt_path
    );
    Ok(())
}

use anyhow::{Context, Result};
use csv::Writer;
use std::io::Write;
use std::path::Path;

use crate::model::RatingCurve;

const HEADER: [&str; 4] = ["stage", "discharge", "area", "wetted_perimeter"];

/// Writes the stage table as CSV to `output_path`.
pub fn write_rating_curve(curve: &RatingCurve, output_path: &Path) -> Result<()> {
    let file = std::fs::File::create(output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    write_rating_curve_to(curve, file)
        .with_context(|| format!("Failed to write rating curve: {}", output_path.display()))?;

    tracing::info!(
        "Written rating curve ({} stages): {:?}",
        curve.len(),
        output_path
    );
    Ok(())
}

pub fn write_rating_curve_to<W: Write>(curve: &RatingCurve, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    // Header, then one row per stage
    wtr.write_record(HEADER)?;
    for record in &curve.records {
        wtr.write_record(&[
            record.stage.to_string(),
            record.discharge.to_string(),
            record.area.to_string(),
            record.wetted_perimeter.to_string(),
        ])?;
    }
    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ResampledProfile, StageRecord};
    use tempfile::TempDir;

    fn tiny_curve() -> RatingCurve {
        RatingCurve {
            records: vec![
                StageRecord {
                    stage: 0.0,
                    discharge: 0.0,
                    area: 0.0,
                    wetted_perimeter: 0.0,
                },
                StageRecord {
                    stage: 1.5,
                    discharge: 2.25,
                    area: 3.0,
                    wetted_perimeter: 4.5,
                },
            ],
            resampled: ResampledProfile {
                stations: vec![0.0, 1.0],
                elevations: vec![0.0, 0.0],
                roughness: vec![0.03, 0.03],
                dx: 1.0,
            },
        }
    }

    #[test]
    fn test_table_layout() {
        let mut buffer = Vec::new();
        write_rating_curve_to(&tiny_curve(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "stage,discharge,area,wetted_perimeter\n0,0,0,0\n1.5,2.25,3,4.5\n"
        );
    }

    #[test]
    fn test_write_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rating.csv");
        write_rating_curve(&tiny_curve(), &path).unwrap();
        assert!(path.exists());
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }
}

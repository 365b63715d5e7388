use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::model::Profile;

/// Reads a two-column `station,value` file.
pub fn read_profile(path: &Path) -> Result<Profile> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open profile: {}", path.display()))?;
    let profile = parse_profile(file)
        .with_context(|| format!("Failed to parse profile: {}", path.display()))?;

    debug!("Read {} points from {}", profile.len(), path.display());
    Ok(profile)
}

/// Parses `station,value` rows. `#` lines are comments; a non-numeric first row is a header.
pub fn parse_profile<R: Read>(reader: R) -> Result<Profile> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut profile = Profile::default();
    let mut record = StringRecord::new();
    let mut first = true;

    while reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() < 2 {
            bail!(
                "line {}: expected station and value, found {} field(s)",
                line,
                record.len()
            );
        }
        if record.len() > 2 {
            warn!("line {}: ignoring {} extra field(s)", line, record.len() - 2);
        }

        let station = record[0].parse::<f64>();
        let value = record[1].parse::<f64>();
        match (station, value) {
            (Ok(station), Ok(value)) => {
                profile.stations.push(station);
                profile.values.push(value);
            }
            _ if first => {
                debug!("line {}: treating {:?} as header", line, record);
            }
            (Err(e), _) => bail!("line {}: invalid station {:?}: {}", line, &record[0], e),
            (_, Err(e)) => bail!("line {}: invalid value {:?}: {}", line, &record[1], e),
        }
        first = false;
    }

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_with_header_and_comments() {
        let data = "# surveyed 2021-05-03\nstation, elevation\n0, 1.0\n5,0\n 10 , 1\n";
        let profile = parse_profile(data.as_bytes()).unwrap();
        assert_eq!(profile.stations, vec![0.0, 5.0, 10.0]);
        assert_eq!(profile.values, vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_parse_rejects_bad_number_after_header() {
        let data = "0,1\n5,abc\n";
        let err = parse_profile(data.as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 2"), "unexpected message: {}", msg);
        assert!(msg.contains("abc"), "unexpected message: {}", msg);
    }

    #[test]
    fn test_parse_rejects_short_row() {
        let data = "0,1\n5\n";
        assert!(parse_profile(data.as_bytes()).is_err());
    }

    #[test]
    fn test_read_profile_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("roughness.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "station,n").unwrap();
        writeln!(file, "0,0.035").unwrap();
        writeln!(file, "10,0.030").unwrap();
        drop(file);

        let profile = read_profile(&path).unwrap();
        assert_eq!(profile.stations, vec![0.0, 10.0]);
        assert_eq!(profile.values, vec![0.035, 0.030]);

        let missing = temp_dir.path().join("missing.csv");
        let err = read_profile(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to open profile"));
    }
}

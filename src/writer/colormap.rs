use anyhow::{ensure, Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::fs;
use std::path::{Path, PathBuf};

/// One breakpoint of a ParaView color map. Components are in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPoint {
    pub x: f64,
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// A named RGB color map, written as a ParaView `ColorMaps` XML document.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    pub name: String,
    pub points: Vec<ColorPoint>,
}

impl ColorMap {
    /// Builds a color map from parallel breakpoint and component arrays.
    pub fn from_arrays(
        name: impl Into<String>,
        values: &[f64],
        r: &[f64],
        g: &[f64],
        b: &[f64],
    ) -> Result<Self> {
        let name = name.into();
        ensure!(
            r.len() == values.len() && g.len() == values.len() && b.len() == values.len(),
            "Color map {}: {} values but {} red, {} green, {} blue components",
            name,
            values.len(),
            r.len(),
            g.len(),
            b.len()
        );

        let mut points = Vec::with_capacity(values.len());
        for i in 0..values.len() {
            for (channel, component) in [("red", r[i]), ("green", g[i]), ("blue", b[i])] {
                ensure!(
                    (0.0..=1.0).contains(&component),
                    "Color map {}: {} component {} at breakpoint {} is outside [0, 1]",
                    name,
                    channel,
                    component,
                    i
                );
            }
            points.push(ColorPoint {
                x: values[i],
                r: r[i],
                g: g[i],
                b: b[i],
            });
        }

        Ok(Self { name, points })
    }

    /// HEC-RAS water depth palette, cyan in the shallows to navy at `max_depth`.
    ///
    /// Lets SRH-2D results in ParaView share RAS Mapper's depth colors.
    pub fn hec_ras_water_depth(max_depth: f64) -> Self {
        const GREEN: [f64; 5] = [255.0, 191.0, 128.0, 64.0, 0.0];
        const BLUE: [f64; 5] = [255.0, 226.0, 197.0, 168.0, 139.0];

        let points = (0..5)
            .map(|i| ColorPoint {
                x: max_depth * i as f64 / 4.0,
                r: 0.0,
                g: GREEN[i] / 255.0,
                b: BLUE[i] / 255.0,
            })
            .collect();

        Self {
            name: "HEC_RAS_Water_Depth".to_string(),
            points,
        }
    }

    /// File name ParaView's color map importer is pointed at.
    pub fn file_name(&self) -> String {
        format!("{}_colormaps.xml", self.name)
    }
}

#[derive(Default)]
pub struct ColorMapWriter {}

impl ColorMapWriter {
    pub fn new() -> Self {
        Self {}
    }

    /// Writes `<name>_colormaps.xml` into `dir` and returns its path.
    pub fn write(&self, color_map: &ColorMap, dir: &Path) -> Result<PathBuf> {
        if color_map.points.is_empty() {
            tracing::warn!("Color map {} has no breakpoints", color_map.name);
        }

        // Serialize, then write into dir
        let xml = self.to_xml(color_map)?;
        let output_path = dir.join(color_map.file_name());
        fs::write(&output_path, xml)
            .with_context(|| format!("Failed to write color map: {}", output_path.display()))?;

        tracing::info!(
            "Written color map {} ({} points): {:?}",
            color_map.name,
            color_map.points.len(),
            output_path
        );
        Ok(output_path)
    }

    pub fn to_xml(&self, color_map: &ColorMap) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        // Declaration and root element
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .context("Failed to write XML declaration")?;
        writer
            .write_event(Event::Start(BytesStart::new("ColorMaps")))
            .context("Failed to open ColorMaps")?;

        let mut map = BytesStart::new("ColorMap");
        map.push_attribute(("name", color_map.name.as_str()));
        map.push_attribute(("space", "RGB"));
        writer
            .write_event(Event::Start(map))
            .context("Failed to open ColorMap")?;

        // One Point per breakpoint, fully opaque
        for point in &color_map.points {
            let mut element = BytesStart::new("Point");
            element.push_attribute(("x", point.x.to_string().as_str()));
            element.push_attribute(("o", "1"));
            element.push_attribute(("r", point.r.to_string().as_str()));
            element.push_attribute(("g", point.g.to_string().as_str()));
            element.push_attribute(("b", point.b.to_string().as_str()));
            writer
                .write_event(Event::Empty(element))
                .context("Failed to write Point")?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("ColorMap")))
            .context("Failed to close ColorMap")?;
        writer
            .write_event(Event::End(BytesEnd::new("ColorMaps")))
            .context("Failed to close ColorMaps")?;

        let mut xml = writer.into_inner();
        xml.push(b'\n');
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_color_map_document() {
        let temp_dir = TempDir::new().unwrap();
        let color_map = ColorMap::from_arrays(
            "Velocity",
            &[0.0, 2.5],
            &[0.0, 1.0],
            &[0.5, 0.0],
            &[1.0, 0.25],
        )
        .unwrap();

        let path = ColorMapWriter::new()
            .write(&color_map, temp_dir.path())
            .unwrap();
        assert_eq!(path, temp_dir.path().join("Velocity_colormaps.xml"));

        let xml = fs::read_to_string(&path).unwrap();
        let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<ColorMaps>
  <ColorMap name="Velocity" space="RGB">
    <Point x="0" o="1" r="0" g="0.5" b="1"/>
    <Point x="2.5" o="1" r="1" g="0" b="0.25"/>
  </ColorMap>
</ColorMaps>
"#;
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_mismatched_arrays_rejected() {
        let err = ColorMap::from_arrays("Depth", &[0.0, 1.0], &[0.0], &[0.0, 0.0], &[0.0, 0.0])
            .unwrap_err();
        assert!(err.to_string().contains("2 values but 1 red"), "{}", err);
    }

    #[test]
    fn test_component_range_checked() {
        let err = ColorMap::from_arrays("Depth", &[0.0], &[0.0], &[255.0], &[0.0]).unwrap_err();
        assert!(err.to_string().contains("green"), "{}", err);
    }

    #[test]
    fn test_hec_ras_water_depth_preset() {
        let color_map = ColorMap::hec_ras_water_depth(15.0);
        let xs: Vec<f64> = color_map.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 3.75, 7.5, 11.25, 15.0]);
        assert_eq!(color_map.points[0].g, 1.0);
        assert_eq!(color_map.points[4].g, 0.0);
        assert!((color_map.points[4].b - 139.0 / 255.0).abs() < 1e-15);
        assert!(color_map.points.iter().all(|p| p.r == 0.0));
        assert_eq!(color_map.file_name(), "HEC_RAS_Water_Depth_colormaps.xml");
    }
}

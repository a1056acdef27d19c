// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-sample TSV reports of geometric shape measurements.

use std::f64::consts::PI;
use std::path::Path;

use anyhow::{Context as _, Result};
use geo::{Centroid, Euclidean, Length, MultiPolygon};
use tracing::info;

use cytomatch_core::CellObject;

const HEADER: [&str; 12] = [
    "Sample",
    "Cell label",
    "Nucleus label",
    "Cell area",
    "Cell perimeter",
    "Cell circularity",
    "Centroid X",
    "Centroid Y",
    "Bounding box width",
    "Bounding box height",
    "Nucleus area",
    "Nucleus/cell area ratio",
];

/// Write one tab-separated row per cell object to `path`.
///
/// Nucleus columns are blank for whole-cell-only detections.
pub(crate) fn write_report(path: &Path, sample: &str, objects: &[CellObject]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("creating report {}", path.display()))?;
    writer.write_record(HEADER)?;

    for object in objects {
        let boundary = &object.boundary;
        let area = boundary.area();
        let perimeter = perimeter(boundary.geometry());
        let centroid = boundary
            .geometry()
            .centroid()
            .map_or(boundary.envelope().center(), |p| (p.x(), p.y()));
        let envelope = boundary.envelope();
        let (nucleus_label, nucleus_area, ratio) = match &object.nucleus {
            Some(nucleus) => (
                nucleus.label().to_string(),
                format!("{:.4}", nucleus.area()),
                format!("{:.6}", nucleus.area() / area),
            ),
            None => (String::new(), String::new(), String::new()),
        };
        writer.write_record([
            sample.to_owned(),
            boundary.label().to_string(),
            nucleus_label,
            format!("{area:.4}"),
            format!("{perimeter:.4}"),
            format!("{:.6}", circularity(area, perimeter)),
            format!("{:.4}", centroid.0),
            format!("{:.4}", centroid.1),
            format!("{:.4}", envelope.width()),
            format!("{:.4}", envelope.height()),
            nucleus_area,
            ratio,
        ])?;
    }

    writer.flush()?;
    info!("wrote {} rows to {}", objects.len(), path.display());
    Ok(())
}

/// Total boundary length: exterior plus interior rings of every part.
fn perimeter(geometry: &MultiPolygon<f64>) -> f64 {
    geometry
        .0
        .iter()
        .map(|poly| {
            Euclidean.length(poly.exterior())
                + poly
                    .interiors()
                    .iter()
                    .map(|ring| Euclidean.length(ring))
                    .sum::<f64>()
        })
        .sum()
}

/// `4 pi A / P^2`; 1.0 for a circle, smaller for everything else.
fn circularity(area: f64, perimeter: f64) -> f64 {
    if perimeter > 0.0 {
        4.0 * PI * area / (perimeter * perimeter)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cytomatch_core::{Plane, Region};
    use geo::{LineString, Polygon};

    fn rect(label: u32, x0: f64, y0: f64, x1: f64, y1: f64) -> Region {
        let poly = MultiPolygon::new(vec![Polygon::new(
            LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
            vec![],
        )]);
        Region::new(label, poly, 1.0, Plane::default()).expect("non-degenerate rect")
    }

    #[test]
    fn square_measurements() {
        let geometry = rect(1, 0.0, 0.0, 4.0, 4.0);
        assert_eq!(perimeter(geometry.geometry()), 16.0);
        let c = circularity(16.0, 16.0);
        assert!((c - PI / 4.0).abs() < 1e-12, "square circularity is pi/4");
    }

    #[test]
    fn report_rows_include_nucleus_ratio() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("s1_QUANT.tsv");
        let objects = vec![
            CellObject {
                boundary: rect(1, 0.0, 0.0, 4.0, 4.0),
                nucleus: Some(rect(1, 1.0, 1.0, 3.0, 3.0)),
            },
            CellObject {
                boundary: rect(2, 10.0, 10.0, 12.0, 12.0),
                nucleus: None,
            },
        ];
        write_report(&path, "s1", &objects).expect("report written");

        let text = std::fs::read_to_string(&path).expect("report readable");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3, "header plus one row per object");
        assert!(lines[0].starts_with("Sample\tCell label"));
        let row: Vec<&str> = lines[1].split('\t').collect();
        assert_eq!(row[0], "s1");
        assert_eq!(row[1], "1");
        assert_eq!(row[3], "16.0000");
        assert_eq!(row[11], "0.250000");
        let bare: Vec<&str> = lines[2].split('\t').collect();
        assert_eq!(bare[2], "", "no nucleus label for whole-cell-only rows");
        assert_eq!(bare[11], "");
    }
}

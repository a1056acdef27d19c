// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary tracing of label rasters into polygonal regions.
//!
//! Every labelled pixel contributes its differing-neighbor sides as directed
//! unit edges on the pixel grid, oriented so the labelled interior lies on the
//! left. Stitching those edges back into closed rings recovers exact pixel
//! outlines, including holes and disjoint parts, without any simplification.

use std::collections::BTreeMap;

use geo::{Contains, LineString, MultiPolygon, Point, Polygon};
use tracing::warn;

use cytomatch_core::{Plane, Region};

use crate::raster::LabelRaster;

/// A directed unit edge between two pixel-grid corners.
type Edge = ((i64, i64), (i64, i64));

/// Trace all labelled objects in `raster` into [`Region`]s.
///
/// Pixels sharing a label id form one region; parts of the same label that
/// only touch diagonally become separate polygons of that region's
/// multi-polygon. Regions come back sorted by label id. Objects whose traced
/// geometry is degenerate are skipped with a warning.
pub fn trace_regions(raster: &LabelRaster, downsample: f64, plane: Plane) -> Vec<Region> {
    let mut edges_by_label: BTreeMap<u32, Vec<Edge>> = BTreeMap::new();
    for y in 0..i64::from(raster.height()) {
        for x in 0..i64::from(raster.width()) {
            let label = raster.label(x, y);
            if label == 0 {
                continue;
            }
            let edges = edges_by_label.entry(label).or_default();
            // Interior-on-the-left orientation, one side per differing neighbor.
            if raster.label(x, y - 1) != label {
                edges.push(((x, y), (x + 1, y)));
            }
            if raster.label(x + 1, y) != label {
                edges.push(((x + 1, y), (x + 1, y + 1)));
            }
            if raster.label(x, y + 1) != label {
                edges.push(((x + 1, y + 1), (x, y + 1)));
            }
            if raster.label(x - 1, y) != label {
                edges.push(((x, y + 1), (x, y)));
            }
        }
    }

    let mut regions = Vec::with_capacity(edges_by_label.len());
    for (label, edges) in edges_by_label {
        let geometry = stitch_label(edges, downsample);
        match Region::new(label, geometry, downsample, plane) {
            Ok(region) => regions.push(region),
            Err(err) => warn!("skipping object {label}: {err}"),
        }
    }
    regions
}

/// Assemble one label's directed edges into a multi-polygon.
fn stitch_label(edges: Vec<Edge>, downsample: f64) -> MultiPolygon<f64> {
    let rings = stitch_rings(edges);

    // Exteriors wind positively under the interior-on-the-left convention;
    // negatively wound rings are holes.
    let mut exteriors: Vec<(f64, Vec<(i64, i64)>)> = Vec::new();
    let mut holes: Vec<Vec<(i64, i64)>> = Vec::new();
    for ring in rings {
        let area = signed_area(&ring);
        if area > 0 {
            exteriors.push((area as f64, ring));
        } else if area < 0 {
            holes.push(ring);
        }
    }

    let mut polygons: Vec<(f64, Polygon<f64>)> = exteriors
        .into_iter()
        .map(|(area, ring)| (area, Polygon::new(to_line_string(&ring, downsample), vec![])))
        .collect();

    // Each hole belongs to the smallest exterior whose interior contains it.
    for hole in holes {
        let probe = hole_probe(&hole, downsample);
        let owner = polygons
            .iter_mut()
            .filter(|(_, poly)| poly.contains(&probe))
            .min_by(|a, b| a.0.total_cmp(&b.0));
        if let Some((_, poly)) = owner {
            poly.interiors_push(to_line_string(&hole, downsample));
        }
    }

    MultiPolygon::new(polygons.into_iter().map(|(_, poly)| poly).collect())
}

/// Stitch directed edges into closed rings, preferring the sharpest left turn
/// at junction corners so touching rings never get cross-linked.
fn stitch_rings(mut edges: Vec<Edge>) -> Vec<Vec<(i64, i64)>> {
    edges.sort_unstable();

    let mut outgoing: BTreeMap<(i64, i64), Vec<usize>> = BTreeMap::new();
    for (i, (start, _)) in edges.iter().enumerate() {
        outgoing.entry(*start).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut rings = Vec::new();
    for first in 0..edges.len() {
        if used[first] {
            continue;
        }
        used[first] = true;
        let (origin, mut here) = edges[first];
        let mut dir = (here.0 - origin.0, here.1 - origin.1);
        let mut ring = vec![origin];
        while here != origin {
            ring.push(here);
            let next = next_edge(&edges, &outgoing, &used, here, dir);
            used[next] = true;
            dir = (edges[next].1.0 - here.0, edges[next].1.1 - here.1);
            here = edges[next].1;
        }
        rings.push(ring);
    }
    rings
}

/// Choose the outgoing edge continuing a ring through `corner`.
fn next_edge(
    edges: &[Edge],
    outgoing: &BTreeMap<(i64, i64), Vec<usize>>,
    used: &[bool],
    corner: (i64, i64),
    dir: (i64, i64),
) -> usize {
    let left = (-dir.1, dir.0);
    let candidates = &outgoing[&corner];
    // Left turn, then straight, then right; a reversal never occurs because a
    // pixel side cannot carry both orientations for the same label.
    for want in [left, dir, (-left.0, -left.1)] {
        let found = candidates.iter().copied().find(|&i| {
            !used[i] && (edges[i].1.0 - corner.0, edges[i].1.1 - corner.1) == want
        });
        if let Some(i) = found {
            return i;
        }
    }
    unreachable!("directed boundary edges always close into rings")
}

/// Twice-signed shoelace area of a closed ring.
fn signed_area(ring: &[(i64, i64)]) -> i64 {
    let mut sum = 0;
    for (i, &(x1, y1)) in ring.iter().enumerate() {
        let (x2, y2) = ring[(i + 1) % ring.len()];
        sum += x1 * y2 - x2 * y1;
    }
    sum
}

/// A point guaranteed to lie inside the cavity a hole ring encloses: the
/// center of the background pixel on the non-interior side of its first edge.
fn hole_probe(hole: &[(i64, i64)], downsample: f64) -> Point<f64> {
    let (x1, y1) = hole[0];
    let (x2, y2) = hole[1];
    let (dx, dy) = (x2 - x1, y2 - y1);
    let mid_x = (x1 + x2) as f64 / 2.0 + dy as f64 / 2.0;
    let mid_y = (y1 + y2) as f64 / 2.0 - dx as f64 / 2.0;
    Point::new(mid_x * downsample, mid_y * downsample)
}

fn to_line_string(ring: &[(i64, i64)], downsample: f64) -> LineString<f64> {
    ring.iter()
        .map(|&(x, y)| (x as f64 * downsample, y as f64 * downsample))
        .collect()
}

// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Matching basics.
//!
//! Build a few rectangular regions, match nuclei to whole cells, and print
//! the pairing.
//!
//! Run:
//! - `cargo run -p cytomatch_demos --example match_basics`

use cytomatch_core::{Plane, Region, match_regions};
use geo::{LineString, MultiPolygon, Polygon};

fn rect(label: u32, x0: f64, y0: f64, x1: f64, y1: f64) -> Region {
    let poly = MultiPolygon::new(vec![Polygon::new(
        LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
        vec![],
    )]);
    Region::new(label, poly, 1.0, Plane::default()).unwrap()
}

fn main() {
    // Two whole cells side by side.
    let cells = vec![rect(1, 0.0, 0.0, 10.0, 10.0), rect(2, 12.0, 0.0, 22.0, 10.0)];

    // Nucleus 1 sits fully inside cell 1; nucleus 2 straddles cell 2's left
    // edge, so it matches by best overlap instead of containment.
    let nuclei = vec![rect(1, 2.0, 2.0, 6.0, 6.0), rect(2, 10.0, 2.0, 16.0, 6.0)];

    let result = match_regions(&nuclei, &cells);
    println!(
        "{} pairs ({} by exact containment)",
        result.pairs.len(),
        result.containment_pairs
    );
    for pair in &result.pairs {
        println!(
            "nucleus {} -> cell {}",
            nuclei[pair.nucleus].label(),
            cells[pair.cell].label()
        );
    }
    assert_eq!(result.pairs.len(), 2, "both nuclei should find a cell");
    assert_eq!(result.containment_pairs, 1);
}

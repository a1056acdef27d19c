// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Masks to cell objects.
//!
//! Trace a pair of tiny in-memory label rasters into regions, then pair them
//! into composite cell objects.
//!
//! Run:
//! - `cargo run -p cytomatch_demos --example mask_to_cells`

use cytomatch_core::{Plane, assemble_cells};
use cytomatch_mask::{LabelRaster, trace_regions};

fn main() {
    // 8x8 whole-cell mask: two blocks labelled 1 and 2.
    #[rustfmt::skip]
    let cells = LabelRaster::from_raw(8, 8, vec![
        1, 1, 1, 1, 0, 0, 0, 0,
        1, 1, 1, 1, 0, 0, 0, 0,
        1, 1, 1, 1, 0, 2, 2, 2,
        1, 1, 1, 1, 0, 2, 2, 2,
        0, 0, 0, 0, 0, 2, 2, 2,
        0, 0, 0, 0, 0, 2, 2, 2,
        0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0,
    ]).unwrap();

    // Matching nucleus mask: one nucleus per cell, inside it.
    #[rustfmt::skip]
    let nuclei = LabelRaster::from_raw(8, 8, vec![
        0, 0, 0, 0, 0, 0, 0, 0,
        0, 1, 1, 0, 0, 0, 0, 0,
        0, 1, 1, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 2, 0,
        0, 0, 0, 0, 0, 0, 2, 0,
        0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0,
    ]).unwrap();

    let plane = Plane::default();
    let cell_regions = trace_regions(&cells, 1.0, plane);
    let nucleus_regions = trace_regions(&nuclei, 1.0, plane);
    println!(
        "traced {} whole cells, {} nuclei",
        cell_regions.len(),
        nucleus_regions.len()
    );

    let objects = assemble_cells(nucleus_regions, cell_regions);
    for object in &objects {
        let nucleus = object.nucleus.as_ref().unwrap();
        println!(
            "cell {} (area {}) <- nucleus {} (area {})",
            object.boundary.label(),
            object.boundary.area(),
            nucleus.label(),
            nucleus.area()
        );
    }
    assert_eq!(objects.len(), 2, "both cells should receive a nucleus");
}

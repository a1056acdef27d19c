// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Translation from match results into composite cell objects.
//!
//! This layer is deliberately thin: it owns no geometry logic. Matched pairs
//! become composite detections carrying both outlines; unmatched residuals
//! are dropped (their counts are logged, never synthesized into objects).

use tracing::{debug, info};

use crate::matcher::match_regions;
use crate::region::Region;

/// A composite detection: a whole-cell outline, optionally with its nucleus.
#[derive(Clone, Debug)]
pub struct CellObject {
    /// The whole-cell boundary region.
    pub boundary: Region,
    /// The paired nucleus, when one was matched (or when pairing ran at all).
    pub nucleus: Option<Region>,
}

/// Build one detection per whole-cell region, without any matching.
///
/// Used when no nucleus mask exists for a sample.
pub fn assemble_whole_cells(cells: Vec<Region>) -> Vec<CellObject> {
    cells
        .into_iter()
        .map(|boundary| CellObject {
            boundary,
            nucleus: None,
        })
        .collect()
}

/// Match nuclei against whole cells and build one composite object per pair.
///
/// Unmatched regions on either side are discarded; only their counts are
/// reported. Output order is the matcher's discovery order.
pub fn assemble_cells(nuclei: Vec<Region>, cells: Vec<Region>) -> Vec<CellObject> {
    let result = match_regions(&nuclei, &cells);

    debug!(
        containment = result.containment_pairs,
        overlap = result.pairs.len() - result.containment_pairs,
        "matched nuclei to whole cells"
    );
    info!(
        "discarding {} unmatched nuclei and {} unmatched whole-cell regions",
        result.unmatched_nuclei.len(),
        result.unmatched_cells.len()
    );

    let mut nuclei: Vec<Option<Region>> = nuclei.into_iter().map(Some).collect();
    let mut cells: Vec<Option<Region>> = cells.into_iter().map(Some).collect();

    result
        .pairs
        .iter()
        .map(|pair| CellObject {
            boundary: cells[pair.cell].take().expect("each cell consumed once"),
            nucleus: Some(nuclei[pair.nucleus].take().expect("each nucleus consumed once")),
        })
        .collect()
}

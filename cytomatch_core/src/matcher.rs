// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-phase nucleus / whole-cell matching engine.

use std::cmp::Ordering;

use cytomatch_index::{Envelope, RegionIndex};
use geo::{Area, BooleanOps};

use crate::region::Region;

/// Relative tolerance when comparing a boolean-ops intersection area against
/// an input area. Boolean ops quantize coordinates internally, so true
/// containment lands within a few ulps of exact equality rather than on it.
const AREA_EPS: f64 = 1e-9;

/// One committed association, as slot indices into the caller's slices.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatchedPair {
    /// Index into the nuclei slice.
    pub nucleus: usize,
    /// Index into the whole-cell slice.
    pub cell: usize,
}

/// Outcome of [`match_regions`].
///
/// Indices refer to positions in the input slices, which is what keeps two
/// geometrically identical regions distinct throughout the bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct MatchResult {
    /// Committed pairs in discovery order: containment matches first (in
    /// nucleus iteration order), then overlap matches (descending fraction).
    pub pairs: Vec<MatchedPair>,
    /// How many leading entries of `pairs` came from the containment phase.
    pub containment_pairs: usize,
    /// Nuclei never committed in either phase.
    pub unmatched_nuclei: Vec<usize>,
    /// Whole cells never committed in either phase.
    pub unmatched_cells: Vec<usize>,
}

/// Ephemeral overlap candidate scored for the greedy sweep.
struct Candidate {
    nucleus: usize,
    cell: usize,
    fraction: f64,
}

/// Pair each nucleus with at most one whole cell, and vice versa.
///
/// Phase 1 walks nuclei in input order and commits each to the first still
/// unconsumed whole cell that fully covers it, found via a quadtree envelope
/// query. When several whole cells cover the same nucleus the winner is
/// whichever the index traversal yields first; that order is deterministic
/// for a given input but follows no geometric preference.
///
/// Phase 2 scores every remaining (nucleus, whole cell) pair that shares
/// interior area by `intersection_area / nucleus_area`, sorts all candidates
/// descending (stable, so equal fractions keep generation order: nucleus
/// input order, then index traversal order), and commits greedily. The sweep
/// approximates maximum-weight bipartite matching; it is deterministic but
/// not guaranteed optimal.
///
/// Empty inputs are fine: with no nuclei the result is immediate and no
/// index is built; with no whole cells every nucleus ends up unmatched.
pub fn match_regions(nuclei: &[Region], cells: &[Region]) -> MatchResult {
    if nuclei.is_empty() {
        return MatchResult {
            unmatched_cells: (0..cells.len()).collect(),
            ..MatchResult::default()
        };
    }

    let entries: Vec<(Envelope, usize)> = cells
        .iter()
        .enumerate()
        .map(|(slot, cell)| (cell.envelope(), slot))
        .collect();
    let index = RegionIndex::build(&entries);

    let mut remaining_cell = vec![true; cells.len()];
    let mut matched_nucleus = vec![false; nuclei.len()];
    let mut pairs = Vec::new();

    // Phase 1: exact containment.
    for (n, nucleus) in nuclei.iter().enumerate() {
        let hit = index
            .query(nucleus.envelope())
            .find(|&c| remaining_cell[c] && covers(&cells[c], nucleus));
        if let Some(c) = hit {
            remaining_cell[c] = false;
            matched_nucleus[n] = true;
            pairs.push(MatchedPair { nucleus: n, cell: c });
        }
    }
    let containment_pairs = pairs.len();

    // Phase 2: greedy best overlap across all remaining pairs at once.
    let mut candidates = Vec::new();
    for (n, nucleus) in nuclei.iter().enumerate() {
        if matched_nucleus[n] {
            continue;
        }
        for c in index.query(nucleus.envelope()) {
            if !remaining_cell[c] {
                continue;
            }
            if let Some(fraction) = overlap_fraction(nucleus, &cells[c]) {
                candidates.push(Candidate {
                    nucleus: n,
                    cell: c,
                    fraction,
                });
            }
        }
    }
    candidates.sort_by(|a, b| {
        b.fraction
            .partial_cmp(&a.fraction)
            .unwrap_or(Ordering::Equal)
    });
    for cand in candidates {
        if matched_nucleus[cand.nucleus] || !remaining_cell[cand.cell] {
            continue; // stale: one side got consumed by a better candidate
        }
        remaining_cell[cand.cell] = false;
        matched_nucleus[cand.nucleus] = true;
        pairs.push(MatchedPair {
            nucleus: cand.nucleus,
            cell: cand.cell,
        });
    }

    let unmatched_nuclei = matched_nucleus
        .iter()
        .enumerate()
        .filter_map(|(n, matched)| (!matched).then_some(n))
        .collect();
    let unmatched_cells = remaining_cell
        .iter()
        .enumerate()
        .filter_map(|(c, remaining)| remaining.then_some(c))
        .collect();

    MatchResult {
        pairs,
        containment_pairs,
        unmatched_nuclei,
        unmatched_cells,
    }
}

/// Area of the polygon intersection, degraded to zero if the computation
/// produced a non-finite result. A malformed region must only lose its own
/// match decisions, never abort the batch.
fn intersection_area(a: &Region, b: &Region) -> f64 {
    let inter = a.geometry().intersection(b.geometry());
    let area = inter.unsigned_area();
    if area.is_finite() { area } else { 0.0 }
}

/// Boundary-inclusive containment: every point of the nucleus lies in or on
/// the whole cell. A nucleus flush against the cell outline still counts.
fn covers(cell: &Region, nucleus: &Region) -> bool {
    if !cell.envelope().contains_envelope(&nucleus.envelope()) {
        return false;
    }
    intersection_area(cell, nucleus) >= nucleus.area() * (1.0 - AREA_EPS)
}

/// Fraction of the nucleus area inside the whole cell, in (0, 1).
///
/// `None` when the regions do not overlap in the strict sense: no shared
/// interior, or one of them covers the other.
fn overlap_fraction(nucleus: &Region, cell: &Region) -> Option<f64> {
    let inter = intersection_area(cell, nucleus);
    if inter <= 0.0 {
        return None;
    }
    if inter >= nucleus.area() * (1.0 - AREA_EPS) || inter >= cell.area() * (1.0 - AREA_EPS) {
        return None;
    }
    let fraction = inter / nucleus.area();
    fraction.is_finite().then_some(fraction)
}

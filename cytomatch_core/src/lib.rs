// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cytomatch Core: pairing nucleus regions with their enclosing whole-cell regions.
//!
//! Segmentation tools commonly emit two label masks per sample: one for
//! nuclei, one for whole cells. The masks are noisy, partially overlapping,
//! and rarely bijective, so composing "cell" objects out of them is a spatial
//! matching problem. This crate solves it with a two-phase engine:
//!
//! 1. **Containment pass** — each nucleus is matched to the first still
//!    unconsumed whole cell that fully covers it (boundary touching counts
//!    as inside), found through a quadtree envelope query.
//! 2. **Greedy overlap pass** — remaining nuclei generate candidates scored
//!    by the fraction of the nucleus area inside each still unconsumed whole
//!    cell; all candidates are sorted descending and committed greedily, each
//!    region consumed at most once.
//!
//! The greedy sweep is a deterministic approximation to maximum-weight
//! bipartite matching, not the optimum; see [`matcher::match_regions`] for
//! the documented tie-breaks.
//!
//! [`assembler`] sits just outside the engine and translates match results
//! into composite [`CellObject`]s for downstream measurement and export.
//!
//! # Example
//!
//! ```rust
//! use cytomatch_core::{Plane, Region, match_regions};
//! use geo::{MultiPolygon, Polygon, LineString};
//!
//! fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
//!     MultiPolygon::new(vec![Polygon::new(
//!         LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
//!         vec![],
//!     )])
//! }
//!
//! let nuclei = vec![Region::new(1, rect(2.0, 2.0, 8.0, 8.0), 1.0, Plane::default()).unwrap()];
//! let cells = vec![Region::new(1, rect(0.0, 0.0, 10.0, 10.0), 1.0, Plane::default()).unwrap()];
//!
//! let result = match_regions(&nuclei, &cells);
//! assert_eq!(result.pairs.len(), 1);
//! assert!(result.unmatched_nuclei.is_empty());
//! ```

pub mod assembler;
pub mod matcher;
pub mod region;

pub use assembler::{CellObject, assemble_cells, assemble_whole_cells};
pub use matcher::{MatchResult, MatchedPair, match_regions};
pub use region::{Plane, Region, RegionError};

// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cytomatch Index: a build-once 2D envelope index.
//!
//! A reusable building block for the candidate-generation half of region
//! matching: insert axis-aligned envelopes with small copyable payloads, then
//! query with a rectangle to obtain candidate payloads.
//!
//! The query contract is deliberately approximate: every inserted envelope
//! that intersects the query rectangle is returned (no false negatives), and
//! non-intersecting payloads may be returned as well when a backend trades
//! precision for speed. Callers re-verify candidates against exact geometry.
//! There is no removal; consumed entries are filtered by the caller.
//!
//! Backends are pluggable via a small trait so the spatial strategy can be
//! swapped without API churn:
//!
//! - [`FlatVec`] (default for tiny sets): linear scans, exact envelope tests.
//! - [`QuadTree`]: recursive quadrant decomposition; entries that straddle a
//!   split line stay at the interior node. Sub-linear average query cost for
//!   thousands of entries.
//!
//! # Example
//!
//! ```rust
//! use cytomatch_index::{Envelope, RegionIndex};
//!
//! let entries = [
//!     (Envelope::new(0.0, 0.0, 10.0, 10.0), 1_u32),
//!     (Envelope::new(50.0, 50.0, 60.0, 60.0), 2_u32),
//! ];
//! let idx = RegionIndex::build(&entries);
//!
//! let hits: Vec<u32> = idx.query(Envelope::new(5.0, 5.0, 15.0, 15.0)).collect();
//! assert_eq!(hits, vec![1]);
//! ```
//!
//! # Float semantics
//!
//! Coordinates are `f64` and assumed free of NaN; envelopes of real mask
//! regions are always finite.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod envelope;
pub mod index;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use backends::quadtree::QuadTree;
pub use envelope::Envelope;
pub use index::{IndexGeneric, RegionIndex};

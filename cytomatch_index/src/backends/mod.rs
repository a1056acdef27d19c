// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in spatial backends.
//!
//! - [`flatvec::FlatVec`]: linear scans over a dense slot vector. Smallest
//!   possible implementation; the right choice when entry counts are tiny or
//!   a baseline is needed for comparison.
//! - [`quadtree::QuadTree`]: recursive quadrant decomposition over the bulk
//!   extent. Entries live in the deepest node whose quadrant fully contains
//!   their envelope; straddling entries stay at interior nodes, so queries
//!   visit a small superset of true intersections.

pub mod flatvec;
pub mod quadtree;

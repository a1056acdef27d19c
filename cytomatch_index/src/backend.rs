// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use alloc::boxed::Box;

use crate::envelope::Envelope;

/// Spatial backend abstraction used by [`IndexGeneric`](crate::IndexGeneric).
///
/// Slots are dense indices assigned by the owning index. Backends store only
/// the envelope geometry; payload bookkeeping stays in the index.
pub trait Backend {
    /// Insert a new slot into the spatial structure.
    fn insert(&mut self, slot: usize, envelope: Envelope);

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Query slots whose stored envelope intersects the rectangle.
    ///
    /// May yield extra slots whose envelope does not intersect; must never
    /// omit one that does.
    fn query<'a>(&'a self, envelope: Envelope) -> Box<dyn Iterator<Item = usize> + 'a>;
}

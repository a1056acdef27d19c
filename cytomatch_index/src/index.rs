// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public index API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::envelope::Envelope;

/// A generic envelope index parameterized by a spatial backend.
///
/// Entries are `(envelope, payload)` pairs; payloads are small copyable
/// handles (the caller's region identities). The index is append-only: a
/// consumed entry is filtered out by the caller after querying, not removed
/// here, which keeps backends single-purpose.
#[derive(Debug)]
pub struct IndexGeneric<P: Copy + Debug, B: Backend> {
    payloads: Vec<P>,
    backend: B,
}

impl<P, B> IndexGeneric<P, B>
where
    P: Copy + Debug,
    B: Backend + Default,
{
    /// Create an empty index using the backend's default constructor.
    pub fn new() -> Self {
        Self {
            payloads: Vec::new(),
            backend: B::default(),
        }
    }
}

impl<P: Copy + Debug, B: Backend + Default> Default for IndexGeneric<P, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, B> IndexGeneric<P, B>
where
    P: Copy + Debug,
    B: Backend,
{
    /// Insert one envelope with its payload.
    pub fn insert(&mut self, envelope: Envelope, payload: P) {
        let slot = self.payloads.len();
        self.payloads.push(payload);
        self.backend.insert(slot, envelope);
    }

    /// Number of entries inserted.
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// True when no entries have been inserted.
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Candidate payloads whose envelope intersects the query window.
    ///
    /// No false negatives; possible false positives. Iteration order is the
    /// backend's traversal order: deterministic for a given construction
    /// sequence but not canonical across backends.
    pub fn query(&self, envelope: Envelope) -> impl Iterator<Item = P> + '_ {
        self.backend
            .query(envelope)
            .map(move |slot| self.payloads[slot])
    }
}

/// Default index: quadtree-backed, payloads are caller handles.
pub type RegionIndex<P> = IndexGeneric<P, crate::backends::quadtree::QuadTree>;

impl<P: Copy + Debug> RegionIndex<P> {
    /// Bulk-build a quadtree index from a known entry set.
    ///
    /// The root extent is sized to the union of all envelopes up front, so no
    /// rebuild-on-grow ever happens.
    pub fn build(entries: &[(Envelope, P)]) -> Self {
        let Some(bounds) = entries
            .iter()
            .map(|(e, _)| *e)
            .reduce(|a, b| a.union(&b))
        else {
            return Self::new();
        };
        let mut idx = Self {
            payloads: Vec::with_capacity(entries.len()),
            backend: crate::backends::quadtree::QuadTree::with_bounds(bounds),
        };
        for (envelope, payload) in entries.iter().copied() {
            idx.insert(envelope, payload);
        }
        idx
    }
}

// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree backend: recursive quadrant decomposition keyed on envelopes.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::envelope::Envelope;

/// Split a node once it holds more than this many entries.
const MAX_ITEMS: usize = 8;
/// Stop subdividing below this depth; clustered entries pile up in one leaf.
const MAX_DEPTH: u32 = 12;

/// Quadtree backend.
///
/// Each entry is stored in the deepest node whose quadrant fully contains its
/// envelope; entries straddling a split line stay at the interior node. The
/// root extent grows by rebuilding when an entry falls outside it, so bulk
/// construction from a known extent is the cheap path.
pub struct QuadTree {
    arena: Vec<Node>,
    root: Option<NodeIdx>,
}

struct Node {
    bounds: Envelope,
    depth: u32,
    items: Vec<(usize, Envelope)>,
    children: Option<[NodeIdx; 4]>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

impl Node {
    fn new(bounds: Envelope, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            items: Vec::new(),
            children: None,
        }
    }

    fn quadrants(&self) -> [Envelope; 4] {
        let (cx, cy) = self.bounds.center();
        let b = &self.bounds;
        [
            Envelope::new(b.min_x, b.min_y, cx, cy),
            Envelope::new(cx, b.min_y, b.max_x, cy),
            Envelope::new(b.min_x, cy, cx, b.max_y),
            Envelope::new(cx, cy, b.max_x, b.max_y),
        ]
    }
}

impl Default for QuadTree {
    fn default() -> Self {
        Self {
            arena: Vec::new(),
            root: None,
        }
    }
}

impl QuadTree {
    /// Build a quadtree whose root covers `bounds` ahead of insertion.
    ///
    /// Entries outside `bounds` still work; they trigger a root rebuild.
    pub fn with_bounds(bounds: Envelope) -> Self {
        let mut tree = Self::default();
        tree.arena.push(Node::new(bounds, 0));
        tree.root = Some(NodeIdx::new(0));
        tree
    }

    fn insert_node(arena: &mut Vec<Node>, node_idx: usize, slot: usize, envelope: Envelope) {
        if arena[node_idx].children.is_none()
            && arena[node_idx].items.len() >= MAX_ITEMS
            && arena[node_idx].depth < MAX_DEPTH
        {
            Self::subdivide(arena, node_idx);
        }

        if let Some(children) = arena[node_idx].children {
            let quadrants = arena[node_idx].quadrants();
            for (child, quadrant) in children.iter().zip(quadrants.iter()) {
                if quadrant.contains_envelope(&envelope) {
                    Self::insert_node(arena, child.get(), slot, envelope);
                    return;
                }
            }
        }
        arena[node_idx].items.push((slot, envelope));
    }

    fn subdivide(arena: &mut Vec<Node>, node_idx: usize) {
        let quadrants = arena[node_idx].quadrants();
        let depth = arena[node_idx].depth;
        let mut children = [NodeIdx::new(0); 4];
        for (i, quadrant) in quadrants.iter().enumerate() {
            children[i] = NodeIdx::new(arena.len());
            arena.push(Node::new(*quadrant, depth + 1));
        }
        arena[node_idx].children = Some(children);

        // Push straddle-free items down one level.
        let items = core::mem::take(&mut arena[node_idx].items);
        let mut kept = Vec::new();
        for (slot, envelope) in items {
            let child = quadrants
                .iter()
                .position(|q| q.contains_envelope(&envelope));
            match child {
                Some(i) => Self::insert_node(arena, children[i].get(), slot, envelope),
                None => kept.push((slot, envelope)),
            }
        }
        arena[node_idx].items = kept;
    }

    /// Rebuild with a root covering the union of the old extent and `extra`.
    fn grow(&mut self, extra: Envelope) {
        let mut entries: Vec<(usize, Envelope)> = Vec::new();
        let mut bounds = extra;
        for node in &self.arena {
            bounds = bounds.union(&node.bounds);
            entries.extend_from_slice(&node.items);
        }
        self.arena.clear();
        self.arena.push(Node::new(bounds, 0));
        self.root = Some(NodeIdx::new(0));
        for (slot, envelope) in entries {
            Self::insert_node(&mut self.arena, 0, slot, envelope);
        }
    }
}

impl Backend for QuadTree {
    fn insert(&mut self, slot: usize, envelope: Envelope) {
        match self.root {
            None => {
                self.arena.push(Node::new(envelope, 0));
                self.root = Some(NodeIdx::new(0));
                self.arena[0].items.push((slot, envelope));
            }
            Some(root_idx) => {
                if !self.arena[root_idx.get()].bounds.contains_envelope(&envelope) {
                    self.grow(envelope);
                }
                Self::insert_node(&mut self.arena, 0, slot, envelope);
            }
        }
    }

    fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    fn query<'a>(&'a self, envelope: Envelope) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut out = Vec::new();
        let Some(root_idx) = self.root else {
            return Box::new(out.into_iter());
        };
        let mut stack = vec![root_idx];
        while let Some(i) = stack.pop() {
            let node = &self.arena[i.get()];
            if !node.bounds.intersects(&envelope) {
                continue;
            }
            for (slot, stored) in &node.items {
                if stored.intersects(&envelope) {
                    out.push(*slot);
                }
            }
            if let Some(children) = node.children {
                stack.extend(children);
            }
        }
        Box::new(out.into_iter())
    }
}

impl Debug for QuadTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let items: usize = self.arena.iter().map(|n| n.items.len()).sum();
        f.debug_struct("QuadTree")
            .field("nodes", &self.arena.len())
            .field("items", &items)
            .field("has_root", &self.root.is_some())
            .finish_non_exhaustive()
    }
}

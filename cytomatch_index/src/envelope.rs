// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned envelope type and helpers.

/// Axis-aligned bounding box of a region geometry, in mask pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Envelope {
    /// Minimum x (left).
    pub min_x: f64,
    /// Minimum y (top).
    pub min_y: f64,
    /// Maximum x (right).
    pub max_x: f64,
    /// Maximum y (bottom).
    pub max_y: f64,
}

impl Envelope {
    /// Create an envelope from min/max corners.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The smallest envelope containing a set of points.
    ///
    /// Returns `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut env = Self::new(x0, y0, x0, y0);
        for (x, y) in it {
            env.min_x = env.min_x.min(x);
            env.min_y = env.min_y.min(y);
            env.max_x = env.max_x.max(x);
            env.max_y = env.max_y.max(y);
        }
        Some(env)
    }

    /// Whether the two envelopes intersect, boundary touching included.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Whether `other` lies entirely inside this envelope (boundary inclusive).
    pub fn contains_envelope(&self, other: &Self) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// The union of two envelopes.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Center point of the envelope.
    pub fn center(&self) -> (f64, f64) {
        (
            0.5 * (self.min_x + self.max_x),
            0.5 * (self.min_y + self.max_y),
        )
    }

    /// Width of the envelope. Negative widths mean an inverted envelope.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the envelope. Negative heights mean an inverted envelope.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_covers_all() {
        let env =
            Envelope::from_points([(3.0, 1.0), (0.0, 4.0), (2.0, 2.0)]).expect("non-empty input");
        assert_eq!(env, Envelope::new(0.0, 1.0, 3.0, 4.0));
    }

    #[test]
    fn from_points_empty_is_none() {
        assert!(Envelope::from_points(core::iter::empty()).is_none());
    }

    #[test]
    fn touching_counts_as_intersecting() {
        let a = Envelope::new(0.0, 0.0, 1.0, 1.0);
        let b = Envelope::new(1.0, 0.0, 2.0, 1.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn disjoint_does_not_intersect() {
        let a = Envelope::new(0.0, 0.0, 1.0, 1.0);
        let b = Envelope::new(2.0, 2.0, 3.0, 3.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn containment_is_boundary_inclusive() {
        let outer = Envelope::new(0.0, 0.0, 10.0, 10.0);
        let inner = Envelope::new(0.0, 2.0, 5.0, 10.0);
        assert!(outer.contains_envelope(&inner));
        assert!(!inner.contains_envelope(&outer));
    }

    #[test]
    fn union_and_center() {
        let a = Envelope::new(0.0, 0.0, 2.0, 2.0);
        let b = Envelope::new(4.0, 4.0, 6.0, 6.0);
        let u = a.union(&b);
        assert_eq!(u, Envelope::new(0.0, 0.0, 6.0, 6.0));
        assert_eq!(u.center(), (3.0, 3.0));
    }
}

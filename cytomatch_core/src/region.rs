// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immutable region value type produced by mask labeling.

use cytomatch_index::Envelope;
use geo::{Area, BoundingRect, MultiPolygon};
use thiserror::Error;

/// Image plane a region was extracted from: z-slice and timepoint.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Plane {
    /// Z-slice index.
    pub z: i32,
    /// Timepoint index.
    pub t: i32,
}

impl Plane {
    /// Plane `(z, t)`.
    pub const fn new(z: i32, t: i32) -> Self {
        Self { z, t }
    }
}

/// Rejected region geometries.
#[derive(Debug, Error)]
pub enum RegionError {
    /// The labeling step may legitimately skip a label id entirely, but a
    /// constructed region must always enclose area.
    #[error("label {label} produced a geometry with no area")]
    EmptyGeometry {
        /// The offending label id.
        label: u32,
    },
}

/// One labeled region of a segmentation mask.
///
/// A region is an immutable value: a polygonal geometry (possibly with holes
/// or multiple parts) plus its cached envelope and area. Two regions with
/// identical geometry are still distinct entities; all matching bookkeeping
/// runs on slice positions, never on geometric equality.
#[derive(Clone, Debug)]
pub struct Region {
    label: u32,
    geometry: MultiPolygon<f64>,
    envelope: Envelope,
    area: f64,
    downsample: f64,
    plane: Plane,
}

impl Region {
    /// Construct a region from labeled geometry.
    ///
    /// Coordinates carry whatever scaling the caller applied; `downsample`
    /// and `plane` ride along as metadata and play no role in matching.
    pub fn new(
        label: u32,
        geometry: MultiPolygon<f64>,
        downsample: f64,
        plane: Plane,
    ) -> Result<Self, RegionError> {
        let area = geometry.unsigned_area();
        let rect = geometry.bounding_rect();
        match rect {
            Some(rect) if area > 0.0 => Ok(Self {
                label,
                geometry,
                envelope: Envelope::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y),
                area,
                downsample,
                plane,
            }),
            _ => Err(RegionError::EmptyGeometry { label }),
        }
    }

    /// The mask label id this region was traced from.
    pub fn label(&self) -> u32 {
        self.label
    }

    /// The region's polygonal geometry.
    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// Cached axis-aligned bounding box.
    pub fn envelope(&self) -> Envelope {
        self.envelope
    }

    /// Cached unsigned area; always positive.
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Scale factor between mask pixels and full-resolution coordinates.
    pub fn downsample(&self) -> f64 {
        self.downsample
    }

    /// Plane the source mask belongs to.
    pub fn plane(&self) -> Plane {
        self.plane
    }
}

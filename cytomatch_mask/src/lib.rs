// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cytomatch Mask: label rasters in, polygonal regions out.
//!
//! A segmentation mask is a single-channel raster where each pixel holds the
//! id of the object it belongs to and `0` means background. This crate turns
//! such a raster into one [`Region`](cytomatch_core::Region) per present
//! label id: pixel-edge boundary tracing produces exact outlines, holes
//! become interior rings, and disconnected blobs sharing a label become a
//! multi-part geometry. Label ids without any pixels are simply absent from
//! the output; the region list is sparse, not dense.
//!
//! Color (multi-channel) rasters are rejected outright: label ids cannot be
//! recovered unambiguously from RGB data.
//!
//! Coordinates are scaled by a `downsample` factor on the way out, so masks
//! produced at reduced resolution line up with full-resolution images.

pub mod raster;
pub mod trace;

use std::path::Path;

use cytomatch_core::{Plane, Region};

pub use raster::{LabelRaster, MaskError};
pub use trace::trace_regions;

/// Read a label mask image and trace it into regions in one step.
pub fn regions_from_path(
    path: impl AsRef<Path>,
    downsample: f64,
    plane: Plane,
) -> Result<Vec<Region>, MaskError> {
    let raster = LabelRaster::from_path(path)?;
    Ok(trace_regions(&raster, downsample, plane))
}

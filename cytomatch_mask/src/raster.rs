// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory label raster and image decoding.

use std::path::Path;

use image::DynamicImage;
use thiserror::Error;
use tracing::info;

/// Failures while loading or validating a label mask.
#[derive(Debug, Error)]
pub enum MaskError {
    /// The underlying image file could not be read or decoded.
    #[error("failed to read mask image")]
    Image(#[from] image::ImageError),
    /// Multi-channel rasters carry no unambiguous label ids.
    #[error("color masks are not supported; label masks must be single-channel")]
    ColorMask,
    /// Raw buffer length does not agree with the stated dimensions.
    #[error("raster data length {got} does not match {width}x{height}")]
    SizeMismatch {
        /// Stated width in pixels.
        width: u32,
        /// Stated height in pixels.
        height: u32,
        /// Actual buffer length.
        got: usize,
    },
}

/// A single-channel raster of object label ids; `0` is background.
#[derive(Clone, Debug)]
pub struct LabelRaster {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl LabelRaster {
    /// Wrap a raw row-major label buffer.
    pub fn from_raw(width: u32, height: u32, data: Vec<u32>) -> Result<Self, MaskError> {
        if data.len() != width as usize * height as usize {
            return Err(MaskError::SizeMismatch {
                width,
                height,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Decode a label raster from a grayscale image.
    ///
    /// 8- and 16-bit single-channel images are accepted; anything with color
    /// channels is rejected.
    pub fn from_image(image: &DynamicImage) -> Result<Self, MaskError> {
        let (width, height) = (image.width(), image.height());
        let data: Vec<u32> = match image {
            DynamicImage::ImageLuma8(buf) => buf.pixels().map(|p| u32::from(p.0[0])).collect(),
            DynamicImage::ImageLuma16(buf) => buf.pixels().map(|p| u32::from(p.0[0])).collect(),
            _ => return Err(MaskError::ColorMask),
        };
        Self::from_raw(width, height, data)
    }

    /// Open an image file and decode it as a label raster.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MaskError> {
        let path = path.as_ref();
        let raster = Self::from_image(&image::open(path)?)?;
        info!(
            "loaded label mask {} ({}x{}, max label {})",
            path.display(),
            raster.width(),
            raster.height(),
            raster.max_label()
        );
        Ok(raster)
    }

    /// Raster width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Label at `(x, y)`; coordinates outside the raster read as background.
    pub fn label(&self, x: i64, y: i64) -> u32 {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return 0;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "bounds checked against u32 dimensions above"
        )]
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx]
    }

    /// Highest label id present anywhere in the raster.
    pub fn max_label(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }
}

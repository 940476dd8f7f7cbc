//! Raster image types

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba};
use tracing::debug;

use crate::relief_pipeline::common::error::{Result, ReliefError};

/// Number of interleaved samples per pixel (R, G, B, A).
pub const RGBA_CHANNELS: usize = 4;

/// Decoded source raster in 8-bit RGBA
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Interleaved pixel data [R, G, B, A, R, G, B, A, ...]
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Wraps interleaved RGBA8 samples, checking that the buffer matches the
    /// stated dimensions.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ReliefError::InvalidParameter(format!(
                "source image must not be empty, got {}x{}",
                width, height
            )));
        }

        let expected = width
            .checked_mul(height)
            .and_then(|px| px.checked_mul(RGBA_CHANNELS))
            .ok_or_else(|| {
                ReliefError::InvalidParameter(format!(
                    "source image {}x{} is too large",
                    width, height
                ))
            })?;

        if data.len() != expected {
            return Err(ReliefError::InvalidParameter(format!(
                "RGBA buffer holds {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            )));
        }

        Ok(Self { width, height, data })
    }

    /// Builds a raster where every pixel has the same RGBA value.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self> {
        let data = rgba.repeat(width.saturating_mul(height));
        Self::new(width, height, data)
    }

    /// RGBA samples of the pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * RGBA_CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Iterates pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(RGBA_CHANNELS)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Height that keeps the source aspect ratio at `target_width` columns,
    /// rounded to the nearest row and never below one.
    pub fn scaled_height(&self, target_width: usize) -> usize {
        let h = self.height as f64 * (target_width as f64 / self.width as f64);
        (h.round() as usize).max(1)
    }

    /// Resamples to `width`x`height` with a Lanczos3 filter.
    ///
    /// Returns a plain copy when the size already matches.
    pub fn resampled(&self, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ReliefError::InvalidParameter(format!(
                "resample target must not be empty, got {}x{}",
                width, height
            )));
        }

        if width == self.width && height == self.height {
            return Ok(self.clone());
        }

        let to_u32 = |v: usize| {
            u32::try_from(v).map_err(|_| {
                ReliefError::InvalidParameter(format!("dimension {} exceeds u32", v))
            })
        };

        let source: ImageBuffer<Rgba<u8>, &[u8]> =
            ImageBuffer::from_raw(to_u32(self.width)?, to_u32(self.height)?, self.data.as_slice())
                .ok_or_else(|| {
                    ReliefError::InvalidParameter("RGBA buffer does not match dimensions".to_string())
                })?;

        debug!(
            "Resampling {}x{} -> {}x{} (Lanczos3)",
            self.width, self.height, width, height
        );

        let resized = imageops::resize(&source, to_u32(width)?, to_u32(height)?, FilterType::Lanczos3);

        Self::new(width, height, resized.into_raw())
    }
}

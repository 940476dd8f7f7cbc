//! Raster reader backed by the `image` crate.
//!
//! Any container the `image` crate can sniff from its magic bytes is accepted
//! (PNG, JPEG, WebP, BMP, GIF, TIFF, ...). Every decoded image is converted to
//! 8-bit RGBA before it enters the pipeline, so palette, grayscale and 16-bit
//! sources all take the same path through luminance extraction.

use tracing::debug;

use crate::relief_pipeline::common::error::{Result, ReliefError};
use crate::relief_pipeline::raster::reader::RasterReader;
use crate::relief_pipeline::raster::types::RasterImage;

/// Decodes encoded image bytes with the `image` crate.
pub struct ImageCrateReader;

impl RasterReader for ImageCrateReader {
    /// Decodes `data` and converts it to RGBA8.
    ///
    /// # Errors
    ///
    /// * `ReliefError::DecodeFailure` - the bytes are not a supported image
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use relief_panel_rs::relief_pipeline::{ImageCrateReader, RasterReader};
    ///
    /// let bytes = std::fs::read("photo.png").unwrap();
    /// let raster = ImageCrateReader.read_raster(&bytes).unwrap();
    /// println!("{}x{}", raster.width, raster.height);
    /// ```
    fn read_raster(&self, data: &[u8]) -> Result<RasterImage> {
        debug!("Decoding source image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| ReliefError::DecodeFailure(e.to_string()))?;

        debug!("Decoded image color type: {:?}", decoded.color());

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        debug!("Decoded image: {}x{}", width, height);

        RasterImage::new(width as usize, height as usize, rgba.into_raw())
    }
}

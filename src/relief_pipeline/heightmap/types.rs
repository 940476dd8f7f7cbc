//! Heightmap export configuration types

use crate::relief_pipeline::thickness::ThicknessField;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression, balanced level
    Deflate,
}

/// How thickness values are stretched over the 16-bit preview range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewScale {
    /// Thinnest cell maps to 0 and thickest to 65535
    Observed,
    /// `min_mm` maps to 0 and `max_mm` to 65535, so previews made with the
    /// same parameters are directly comparable
    Fixed { min_mm: f64, max_mm: f64 },
}

/// Configuration for heightmap export
#[derive(Debug, Clone)]
pub struct HeightmapConfig {
    /// Compression method to use
    pub compression: TiffCompression,
    /// Horizontal differencing on the 16-bit preview
    pub predictor: bool,
    /// Normalization of the 16-bit preview
    pub preview_scale: PreviewScale,
}

impl Default for HeightmapConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::Deflate,
            predictor: true,
            preview_scale: PreviewScale::Observed,
        }
    }
}

/// Normalizes a field to 16-bit gray.
///
/// A flat field (zero span) maps to 0 everywhere.
pub fn preview_gray16(field: &ThicknessField, scale: PreviewScale) -> Vec<u16> {
    let (lo, hi) = match scale {
        PreviewScale::Observed => {
            let (lo, hi) = field.range();
            (lo as f64, hi as f64)
        }
        PreviewScale::Fixed { min_mm, max_mm } => (min_mm, max_mm),
    };
    let span = (hi - lo).max(1e-9);

    field
        .data
        .iter()
        .map(|&t| {
            let norm = ((t as f64 - lo) / span).clamp(0.0, 1.0);
            (norm * u16::MAX as f64 + 0.5) as u16
        })
        .collect()
}

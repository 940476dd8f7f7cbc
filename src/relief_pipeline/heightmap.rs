//! Heightmap export module
//!
//! This module writes thickness fields as TIFF images: a normalized 16-bit
//! grayscale preview and a lossless 32-bit float copy of the millimetre values.

mod writer;
mod tiff_writer;
pub mod types;

#[cfg(test)]
mod tests;

pub use writer::HeightmapWriter;
pub use tiff_writer::TiffHeightmapWriter;
pub use types::{HeightmapConfig, PreviewScale, TiffCompression, preview_gray16};

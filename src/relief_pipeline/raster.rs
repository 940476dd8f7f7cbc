//! Raster image module
//!
//! This module provides decoding of source images into RGBA8 rasters and
//! aspect-preserving resampling.

mod reader;
mod image_reader;
pub mod types;


pub use reader::RasterReader;
pub use image_reader::ImageCrateReader;
pub use types::RasterImage;

//! Pipeline conversions module
//!
//! This module contains orchestration logic that takes encoded image bytes
//! through field construction, mesh serialization and heightmap export.

mod image_to_relief;
mod naming;
mod timing;
pub mod types;

#[cfg(test)]
mod tests;

pub use image_to_relief::{ImageToReliefPipeline, generate_relief};
pub use naming::{format_width_mm, resolve_out_base, with_suffix};
pub use timing::PipelineTimings;
pub use types::{ReliefArtifacts, ReliefConfig, ReliefConfigBuilder, ReliefOutput};

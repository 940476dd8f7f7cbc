//! Relief conversion configuration and result types

use std::path::PathBuf;

use crate::relief_pipeline::heightmap::HeightmapConfig;
use crate::relief_pipeline::thickness::{ReliefParams, ThicknessField};

/// Configuration for image to relief conversion
#[derive(Debug, Clone)]
pub struct ReliefConfig {
    /// Luminance to thickness mapping
    pub params: ReliefParams,
    /// Heightmap export settings
    pub heightmap: HeightmapConfig,
    /// Whether to build and write the STL mesh
    pub export_stl: bool,
    /// Whether to write the preview and millimetre heightmaps
    pub export_heightmap: bool,
    /// Largest accepted source width or height, if any
    pub max_source_dimension: Option<usize>,
}

impl Default for ReliefConfig {
    fn default() -> Self {
        Self {
            params: ReliefParams::default(),
            heightmap: HeightmapConfig::default(),
            export_stl: true,
            export_heightmap: true,
            max_source_dimension: Some(50000),
        }
    }
}

impl ReliefConfig {
    pub fn builder() -> ReliefConfigBuilder {
        ReliefConfigBuilder::default()
    }
}

/// Builder for ReliefConfig
#[derive(Default)]
pub struct ReliefConfigBuilder {
    params: Option<ReliefParams>,
    heightmap: Option<HeightmapConfig>,
    export_stl: Option<bool>,
    export_heightmap: Option<bool>,
    max_source_dimension: Option<Option<usize>>,
}

impl ReliefConfigBuilder {
    pub fn params(mut self, params: ReliefParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn heightmap(mut self, heightmap: HeightmapConfig) -> Self {
        self.heightmap = Some(heightmap);
        self
    }

    pub fn export_stl(mut self, enable: bool) -> Self {
        self.export_stl = Some(enable);
        self
    }

    pub fn export_heightmap(mut self, enable: bool) -> Self {
        self.export_heightmap = Some(enable);
        self
    }

    pub fn max_source_dimension(mut self, max: Option<usize>) -> Self {
        self.max_source_dimension = Some(max);
        self
    }

    pub fn build(self) -> ReliefConfig {
        let default = ReliefConfig::default();
        ReliefConfig {
            params: self.params.unwrap_or(default.params),
            heightmap: self.heightmap.unwrap_or(default.heightmap),
            export_stl: self.export_stl.unwrap_or(default.export_stl),
            export_heightmap: self.export_heightmap.unwrap_or(default.export_heightmap),
            max_source_dimension: self.max_source_dimension.unwrap_or(default.max_source_dimension),
        }
    }
}

/// In-memory result of one conversion
#[derive(Debug, Clone)]
pub struct ReliefOutput {
    pub field: ThicknessField,
    /// Binary STL stream, absent when STL export is disabled
    pub stl: Option<Vec<u8>>,
    pub triangles: u64,
}

/// Files written by [`convert_file`](crate::relief_pipeline::ImageToReliefPipeline::convert_file)
#[derive(Debug, Clone)]
pub struct ReliefArtifacts {
    pub stl: Option<PathBuf>,
    pub preview: Option<PathBuf>,
    pub raw_mm: Option<PathBuf>,
    pub width: usize,
    pub height: usize,
    pub triangles: u64,
    /// Thinnest and thickest cell in millimetres
    pub thickness_range: (f32, f32),
}

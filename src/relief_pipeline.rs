//! Relief panel pipeline module
//!
//! Turns a raster image into a backlit relief panel: luminance is mapped to a
//! physical thickness field, and the field is closed into a solid STL mesh.
//! Decoding, field construction, mesh serialization and heightmap export live
//! in separate modules, tied together by the conversions module.

pub mod raster;
pub mod thickness;
pub mod stl;
pub mod heightmap;
pub mod conversions;
pub mod common;

pub use common::{
    ReliefError,
    Result,
};

pub use raster::{
    RasterImage,
    RasterReader,
    ImageCrateReader,
};

pub use thickness::{
    ReliefParams,
    ReliefParamsBuilder,
    ThicknessField,
    ThicknessFieldBuilder,
    build_thickness_field,
};

pub use stl::{
    SolidMeshSerializer,
    StlMeshBuilder,
    triangle_count,
    stl_byte_len,
};

pub use heightmap::{
    HeightmapConfig,
    HeightmapWriter,
    PreviewScale,
    TiffCompression,
    TiffHeightmapWriter,
};

pub use conversions::{
    ImageToReliefPipeline,
    ReliefArtifacts,
    ReliefConfig,
    ReliefConfigBuilder,
    ReliefOutput,
    PipelineTimings,
    generate_relief,
    resolve_out_base,
};

use std::io::Write;
use crate::relief_pipeline::common::error::Result;
use crate::relief_pipeline::heightmap::types::HeightmapConfig;
use crate::relief_pipeline::thickness::ThicknessField;

pub trait HeightmapWriter {
    fn write_preview(&self, field: &ThicknessField, output: &mut dyn Write, config: &HeightmapConfig) -> Result<()>;
    fn write_raw_mm(&self, field: &ThicknessField, output: &mut dyn Write, config: &HeightmapConfig) -> Result<()>;
}

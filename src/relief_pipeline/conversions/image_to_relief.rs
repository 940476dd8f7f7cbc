use std::io::Write;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::relief_pipeline::{
    common::error::{ReliefError, Result},
    conversions::naming::with_suffix,
    conversions::timing::PipelineTimings,
    conversions::types::{ReliefArtifacts, ReliefConfig, ReliefOutput},
    heightmap::{HeightmapWriter, TiffHeightmapWriter},
    raster::{ImageCrateReader, RasterImage, RasterReader},
    stl::{SolidMeshSerializer, triangle_count},
    thickness::{ReliefParams, ThicknessField, ThicknessFieldBuilder},
};

/// Builds the thickness field for `image` and closes it into a binary STL.
///
/// Pure: the same image and parameters always give bit-identical output.
pub fn generate_relief(image: &RasterImage, params: &ReliefParams) -> Result<(ThicknessField, Vec<u8>)> {
    let field = ThicknessFieldBuilder::new(params.clone())?.build(image)?;
    let stl = SolidMeshSerializer.serialize_field(&field)?;
    Ok((field, stl))
}

pub struct ImageToReliefPipeline<R: RasterReader, W: HeightmapWriter> {
    reader: R,
    writer: W,
    config: ReliefConfig,
}

impl ImageToReliefPipeline<ImageCrateReader, TiffHeightmapWriter> {
    pub fn new(config: ReliefConfig) -> Result<Self> {
        config.params.validate()?;
        Ok(Self {
            reader: ImageCrateReader,
            writer: TiffHeightmapWriter,
            config,
        })
    }
}

impl<R: RasterReader, W: HeightmapWriter> ImageToReliefPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ReliefConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_source(&self, width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(ReliefError::InvalidParameter(format!(
                "source image must not be empty, got {}x{}",
                width, height
            )));
        }

        if let Some(max) = self.config.max_source_dimension {
            if width > max || height > max {
                warn!("Source dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(ReliefError::InvalidParameter(format!(
                    "source image {}x{} exceeds maximum dimension {}",
                    width, height, max
                )));
            }
        }

        Ok(())
    }

    fn process(&self, input_data: &[u8], timings: &mut PipelineTimings) -> Result<ReliefOutput> {
        let field = {
            let raster = timings.measure("decode_raster", || {
                let _span = tracing::info_span!("decode_raster").entered();
                self.reader.read_raster(input_data)
            })?;

            timings.measure("validate_source", || {
                let _span = tracing::info_span!("validate_source",
                    width = raster.width,
                    height = raster.height
                ).entered();
                self.validate_source(raster.width, raster.height)
            })?;

            let builder = ThicknessFieldBuilder::new(self.config.params.clone())?;
            timings.measure("build_thickness_field", || builder.build(&raster))?
        };

        let triangles = triangle_count(field.width, field.height);

        let stl = if self.config.export_stl {
            let bytes = timings.measure("serialize_stl", || {
                let _span = tracing::info_span!("serialize_stl", triangles).entered();
                SolidMeshSerializer.serialize_field(&field)
            })?;
            Some(bytes)
        } else {
            None
        };

        let (lo, hi) = field.range();
        info!(
            width = field.width,
            height = field.height,
            triangles,
            "Thickness range: {:.3} .. {:.3} mm",
            lo,
            hi
        );

        Ok(ReliefOutput { field, stl, triangles })
    }

    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8]) -> Result<ReliefOutput> {
        info!("Starting image to relief conversion");
        let mut timings = PipelineTimings::new();
        let output = self.process(input_data, &mut timings)?;
        info!(
            "Conversion complete in {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok(output)
    }

    pub fn convert_with_timings(&self, input_data: &[u8]) -> Result<(ReliefOutput, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let output = self.process(input_data, &mut timings)?;
        Ok((output, timings))
    }

    /// Writes the STL stream to `output`.
    pub fn write_stl(&self, relief: &ReliefOutput, output: &mut dyn Write) -> Result<()> {
        let bytes = relief.stl.as_deref().ok_or_else(|| {
            ReliefError::EncodeError("STL export is disabled for this pipeline".to_string())
        })?;
        output.write_all(bytes)?;
        Ok(())
    }

    #[instrument(skip(self, input_path, out_base))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        out_base: Q,
    ) -> Result<ReliefArtifacts> {
        let mut timings = PipelineTimings::new();
        self.convert_file_timed(input_path.as_ref(), out_base.as_ref(), &mut timings)
    }

    pub fn convert_file_with_timings<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        out_base: Q,
    ) -> Result<(ReliefArtifacts, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let artifacts = self.convert_file_timed(input_path.as_ref(), out_base.as_ref(), &mut timings)?;
        Ok((artifacts, timings))
    }

    fn convert_file_timed(
        &self,
        input_path: &Path,
        out_base: &Path,
        timings: &mut PipelineTimings,
    ) -> Result<ReliefArtifacts> {
        info!(
            input = %input_path.display(),
            output = %out_base.display(),
            "Converting file"
        );

        let input_data = timings.measure("read_input_file", || {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ReliefError::InputReadError(format!("{}: {}", input_path.display(), e))
            })
        })?;

        let relief = self.process(&input_data, timings)?;
        drop(input_data);

        let mut artifacts = ReliefArtifacts {
            stl: None,
            preview: None,
            raw_mm: None,
            width: relief.field.width,
            height: relief.field.height,
            triangles: relief.triangles,
            thickness_range: relief.field.range(),
        };

        if self.config.export_heightmap {
            let preview = with_suffix(out_base, "_height_16bit.tif");
            let raw_mm = with_suffix(out_base, "_height_mm.tif");

            timings.measure("write_heightmaps", || -> Result<()> {
                let _span = tracing::info_span!("write_heightmaps").entered();
                let mut file = create_output(&preview)?;
                self.writer.write_preview(&relief.field, &mut file, &self.config.heightmap)?;
                let mut file = create_output(&raw_mm)?;
                self.writer.write_raw_mm(&relief.field, &mut file, &self.config.heightmap)
            })?;

            info!("saved: {} , {}", preview.display(), raw_mm.display());
            artifacts.preview = Some(preview);
            artifacts.raw_mm = Some(raw_mm);
        }

        if relief.stl.is_some() {
            let stl_path = with_suffix(out_base, ".stl");

            timings.measure("write_stl", || -> Result<()> {
                let _span = tracing::info_span!("write_stl").entered();
                let mut file = create_output(&stl_path)?;
                self.write_stl(&relief, &mut file)
            })?;

            info!("saved: {}", stl_path.display());
            artifacts.stl = Some(stl_path);
        }

        Ok(artifacts)
    }

    pub fn config(&self) -> &ReliefConfig {
        &self.config
    }
}

fn create_output(path: &Path) -> Result<std::fs::File> {
    std::fs::File::create(path).map_err(|e| {
        ReliefError::OutputWriteError(format!("{}: {}", path.display(), e))
    })
}

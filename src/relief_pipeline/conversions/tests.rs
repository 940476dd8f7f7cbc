use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use image::{ImageFormat, Rgba, RgbaImage};

use crate::relief_pipeline::common::error::{ReliefError, Result};
use crate::relief_pipeline::conversions::{
    ImageToReliefPipeline, PipelineTimings, ReliefConfig, format_width_mm, generate_relief,
    resolve_out_base, with_suffix,
};
use crate::relief_pipeline::heightmap::{HeightmapConfig, HeightmapWriter};
use crate::relief_pipeline::raster::{RasterImage, RasterReader};
use crate::relief_pipeline::stl::{stl_byte_len, triangle_count};
use crate::relief_pipeline::thickness::{ReliefParams, ThicknessField};

struct MockReader {
    should_fail: bool,
    mock_data: Option<RasterImage>,
}

impl RasterReader for MockReader {
    fn read_raster(&self, _data: &[u8]) -> Result<RasterImage> {
        if self.should_fail {
            return Err(ReliefError::DecodeFailure("Mock decode error".to_string()));
        }
        Ok(self
            .mock_data
            .clone()
            .unwrap_or_else(|| RasterImage::filled(40, 20, [90, 90, 90, 255]).unwrap()))
    }
}

struct MockWriter {
    should_fail: bool,
    written: Arc<Mutex<Vec<(usize, usize)>>>,
}

impl HeightmapWriter for MockWriter {
    fn write_preview(&self, field: &ThicknessField, output: &mut dyn Write, _config: &HeightmapConfig) -> Result<()> {
        if self.should_fail {
            return Err(ReliefError::EncodeError("Mock encode error".to_string()));
        }
        self.written.lock().unwrap().push((field.width, field.height));
        output.write_all(b"preview")?;
        Ok(())
    }

    fn write_raw_mm(&self, field: &ThicknessField, output: &mut dyn Write, _config: &HeightmapConfig) -> Result<()> {
        self.written.lock().unwrap().push((field.width, field.height));
        output.write_all(b"raw")?;
        Ok(())
    }
}

fn small_config() -> ReliefConfig {
    ReliefConfig::builder()
        .params(ReliefParams::builder().target_width_px(20).build())
        .build()
}

fn mock_pipeline(
    reader: MockReader,
    writer_fails: bool,
    config: ReliefConfig,
) -> (ImageToReliefPipeline<MockReader, MockWriter>, Arc<Mutex<Vec<(usize, usize)>>>) {
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockWriter { should_fail: writer_fails, written: written.clone() };
    (ImageToReliefPipeline::with_custom(reader, writer, config), written)
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        let v = (x * 255 / (width - 1)) as u8;
        Rgba([v, v, v, 255])
    });
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn test_config_builder() {
    let config = ReliefConfig::builder()
        .export_stl(false)
        .export_heightmap(false)
        .max_source_dimension(Some(10000))
        .build();

    assert!(!config.export_stl);
    assert!(!config.export_heightmap);
    assert_eq!(config.max_source_dimension, Some(10000));
    assert_eq!(config.params, ReliefParams::default());
}

#[test]
fn test_successful_conversion() {
    let reader = MockReader { should_fail: false, mock_data: None };
    let (pipeline, _) = mock_pipeline(reader, false, small_config());

    let output = pipeline.convert(b"fake image data").unwrap();

    assert_eq!((output.field.width, output.field.height), (20, 10));
    assert_eq!(output.triangles, triangle_count(20, 10));
    let stl = output.stl.unwrap();
    assert_eq!(stl.len() as u64, stl_byte_len(output.triangles));
}

#[test]
fn test_reader_failure() {
    let reader = MockReader { should_fail: true, mock_data: None };
    let (pipeline, _) = mock_pipeline(reader, false, small_config());

    let result = pipeline.convert(b"fake image data");
    assert!(matches!(result.unwrap_err(), ReliefError::DecodeFailure(_)));
}

#[test]
fn test_source_dimension_limit() {
    let reader = MockReader {
        should_fail: false,
        mock_data: Some(RasterImage::filled(300, 10, [0, 0, 0, 255]).unwrap()),
    };
    let config = ReliefConfig::builder()
        .params(ReliefParams::builder().target_width_px(20).build())
        .max_source_dimension(Some(200))
        .build();
    let (pipeline, _) = mock_pipeline(reader, false, config);

    let result = pipeline.convert(b"fake image data");
    assert!(matches!(result.unwrap_err(), ReliefError::InvalidParameter(_)));
}

#[test]
fn test_source_dimension_limit_disabled() {
    let reader = MockReader {
        should_fail: false,
        mock_data: Some(RasterImage::filled(300, 10, [0, 0, 0, 255]).unwrap()),
    };
    let config = ReliefConfig::builder()
        .params(ReliefParams::builder().target_width_px(20).build())
        .max_source_dimension(None)
        .build();
    let (pipeline, _) = mock_pipeline(reader, false, config);

    assert!(pipeline.convert(b"fake image data").is_ok());
}

#[test]
fn test_stl_export_disabled() {
    let reader = MockReader { should_fail: false, mock_data: None };
    let config = ReliefConfig { export_stl: false, ..small_config() };
    let (pipeline, _) = mock_pipeline(reader, false, config);

    let output = pipeline.convert(b"fake image data").unwrap();
    assert!(output.stl.is_none());

    let mut sink = Vec::new();
    assert!(pipeline.write_stl(&output, &mut sink).is_err());
}

#[test]
fn test_invalid_params_rejected_by_new() {
    let config = ReliefConfig {
        params: ReliefParams { tone_gamma: -1.0, ..ReliefParams::default() },
        ..ReliefConfig::default()
    };
    assert!(matches!(
        ImageToReliefPipeline::new(config),
        Err(ReliefError::InvalidParameter(_))
    ));
}

#[test]
fn test_timings_cover_each_step() {
    let reader = MockReader { should_fail: false, mock_data: None };
    let (pipeline, _) = mock_pipeline(reader, false, small_config());

    let (_, timings) = pipeline.convert_with_timings(b"fake image data").unwrap();

    let names: Vec<&str> = timings.steps().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        ["decode_raster", "validate_source", "build_thickness_field", "serialize_stl"]
    );
    assert!(timings.step("serialize_stl").is_some());
    assert!(timings.step("write_preview").is_none());
    assert!(timings.summary().contains("Total"));
}

#[test]
fn test_timings_accumulate_repeated_steps() {
    let mut timings = PipelineTimings::new();
    timings.record("encode", std::time::Duration::from_millis(2));
    timings.record("encode", std::time::Duration::from_millis(3));
    assert_eq!(timings.step("encode"), Some(std::time::Duration::from_millis(5)));
    assert_eq!(timings.steps().count(), 2);
    assert_eq!(timings.total_duration(), std::time::Duration::from_millis(5));
}

#[test]
fn test_generate_relief_matches_pipeline() {
    let image = RasterImage::filled(2, 2, [188, 188, 188, 255]).unwrap();
    let params = ReliefParams::builder()
        .target_width_px(2)
        .base_mm(1.0)
        .relief_mm(1.0)
        .cuts(0.0, 1.0)
        .tone_gamma(1.0)
        .invert(false)
        .build();

    let (field, stl) = generate_relief(&image, &params).unwrap();
    assert_eq!(field.data.len(), 4);
    assert!(field.data.iter().all(|t| (t - 1.5).abs() < 0.01));
    assert_eq!(u32::from_le_bytes(stl[80..84].try_into().unwrap()), 12);
    assert_eq!(stl.len(), 684);
}

#[test]
fn test_format_width_mm() {
    assert_eq!(format_width_mm(100.0), "100");
    assert_eq!(format_width_mm(12.5), "12.5");
    assert_eq!(format_width_mm(12.3456789), "12.3457");
    assert_eq!(format_width_mm(0.1), "0.1");
    assert_eq!(format_width_mm(999999.5), "1e+06");
    assert_eq!(format_width_mm(15_000_000.0), "1.5e+07");
    assert_eq!(format_width_mm(0.00001234), "1.234e-05");
}

#[test]
fn test_resolve_out_base_default() {
    let base = resolve_out_base(Path::new("/photos/cat.jpg"), None, 100.0);
    assert_eq!(base, PathBuf::from("/photos/cat_W100mm"));
}

#[test]
fn test_resolve_out_base_relative_and_absolute() {
    let input = Path::new("/photos/cat.jpg");
    assert_eq!(
        resolve_out_base(input, Some(Path::new("panels/cat")), 80.0),
        PathBuf::from("/photos/panels/cat")
    );
    assert_eq!(
        resolve_out_base(input, Some(Path::new("/tmp/out")), 80.0),
        PathBuf::from("/tmp/out")
    );
}

#[test]
fn test_with_suffix_keeps_decimal_width() {
    let base = PathBuf::from("/photos/cat_W12.5mm");
    assert_eq!(with_suffix(&base, ".stl"), PathBuf::from("/photos/cat_W12.5mm.stl"));
}

#[test]
fn test_convert_file_writes_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("gradient.png");
    std::fs::write(&input, png_bytes(48, 24)).unwrap();

    let config = ReliefConfig::builder()
        .params(ReliefParams::builder().target_width_px(16).target_width_mm(40.0).build())
        .build();
    let pipeline = ImageToReliefPipeline::new(config).unwrap();

    let base = resolve_out_base(&input, None, 40.0);
    let artifacts = pipeline.convert_file(&input, &base).unwrap();

    assert_eq!((artifacts.width, artifacts.height), (16, 8));
    let stl = std::fs::read(artifacts.stl.as_ref().unwrap()).unwrap();
    assert_eq!(stl.len() as u64, stl_byte_len(triangle_count(16, 8)));
    assert!(artifacts.stl.unwrap().ends_with("gradient_W40mm.stl"));
    assert!(artifacts.preview.unwrap().exists());
    assert!(artifacts.raw_mm.unwrap().exists());

    let (lo, hi) = artifacts.thickness_range;
    assert!(lo >= 0.8 && hi <= 2.3 && lo < hi);
}

#[test]
fn test_convert_file_without_stl() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    std::fs::write(&input, png_bytes(20, 20)).unwrap();

    let reader = MockReader { should_fail: false, mock_data: None };
    let config = ReliefConfig { export_stl: false, ..small_config() };
    let (pipeline, written) = mock_pipeline(reader, false, config);

    let base = dir.path().join("out");
    let artifacts = pipeline.convert_file(&input, &base).unwrap();

    assert!(artifacts.stl.is_none());
    assert!(!dir.path().join("out.stl").exists());
    assert_eq!(written.lock().unwrap().len(), 2);
    assert_eq!(std::fs::read(dir.path().join("out_height_16bit.tif")).unwrap(), b"preview");
}

#[test]
fn test_convert_file_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = ImageToReliefPipeline::new(small_config()).unwrap();

    let result = pipeline.convert_file(dir.path().join("missing.png"), dir.path().join("out"));
    assert!(matches!(result.unwrap_err(), ReliefError::InputReadError(_)));
}

#[test]
fn test_writer_failure_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    std::fs::write(&input, b"ignored by the mock reader").unwrap();

    let reader = MockReader { should_fail: false, mock_data: None };
    let (pipeline, _) = mock_pipeline(reader, true, small_config());

    let result = pipeline.convert_file(&input, dir.path().join("out"));
    assert!(matches!(result.unwrap_err(), ReliefError::EncodeError(_)));
}

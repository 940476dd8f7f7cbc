use std::io::Cursor;

use tiff::decoder::{Decoder, DecodingResult};

use crate::relief_pipeline::heightmap::{
    HeightmapConfig, HeightmapWriter, PreviewScale, TiffCompression, TiffHeightmapWriter,
    preview_gray16,
};
use crate::relief_pipeline::thickness::ThicknessField;

fn sample_field() -> ThicknessField {
    ThicknessField::new(3, 2, 0.5, vec![0.8, 1.0, 1.2, 1.6, 2.0, 2.3]).unwrap()
}

fn decode(bytes: &[u8]) -> ((u32, u32), DecodingResult) {
    let mut decoder = Decoder::new(Cursor::new(bytes)).unwrap();
    let dims = decoder.dimensions().unwrap();
    (dims, decoder.read_image().unwrap())
}

#[test]
fn test_observed_scale_spans_full_range() {
    let gray = preview_gray16(&sample_field(), PreviewScale::Observed);
    assert_eq!(gray[0], 0);
    assert_eq!(gray[5], u16::MAX);
    assert!(gray.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_fixed_scale_uses_parameter_range() {
    let gray = preview_gray16(
        &sample_field(),
        PreviewScale::Fixed { min_mm: 0.8, max_mm: 2.8 },
    );
    assert_eq!(gray[0], 0);
    // 2.3 sits three quarters of the way up the 0.8..2.8 window
    let expected = (0.75 * u16::MAX as f64).round() as i32;
    assert!((gray[5] as i32 - expected).abs() <= 2);
}

#[test]
fn test_flat_field_maps_to_zero() {
    let field = ThicknessField::new(2, 2, 1.0, vec![1.5; 4]).unwrap();
    let gray = preview_gray16(&field, PreviewScale::Observed);
    assert_eq!(gray, vec![0; 4]);
}

#[test]
fn test_preview_tiff_roundtrips_gray16() {
    let field = sample_field();
    let config = HeightmapConfig::default();
    let mut out = Vec::new();
    TiffHeightmapWriter
        .write_preview(&field, &mut out, &config)
        .unwrap();

    let (dims, image) = decode(&out);
    assert_eq!(dims, (3, 2));
    match image {
        DecodingResult::U16(values) => {
            assert_eq!(values, preview_gray16(&field, config.preview_scale))
        }
        _ => panic!("expected 16-bit samples"),
    }
}

#[test]
fn test_raw_mm_tiff_is_lossless() {
    let field = sample_field();
    for compression in [TiffCompression::None, TiffCompression::Lzw, TiffCompression::Deflate] {
        let config = HeightmapConfig {
            compression,
            ..HeightmapConfig::default()
        };
        let mut out = Vec::new();
        TiffHeightmapWriter
            .write_raw_mm(&field, &mut out, &config)
            .unwrap();

        let (dims, image) = decode(&out);
        assert_eq!(dims, (3, 2));
        match image {
            DecodingResult::F32(values) => assert_eq!(values, field.data),
            _ => panic!("expected float samples"),
        }
    }
}

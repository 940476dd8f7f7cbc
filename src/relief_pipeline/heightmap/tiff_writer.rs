use std::io::{Cursor, Seek, Write};
use tiff::encoder::colortype::{Gray16, Gray32Float};
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder};
use tiff::tags::Predictor;
use tracing::debug;
use crate::relief_pipeline::common::error::{Result, ReliefError};
use crate::relief_pipeline::heightmap::types::{HeightmapConfig, TiffCompression, preview_gray16};
use crate::relief_pipeline::heightmap::writer::HeightmapWriter;
use crate::relief_pipeline::thickness::ThicknessField;

pub struct TiffHeightmapWriter;

impl TiffHeightmapWriter {
    fn compression(config: &HeightmapConfig) -> Compression {
        match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::Deflate => Compression::Deflate(DeflateLevel::Balanced),
        }
    }

    fn encoder<W: Write + Seek>(sink: W, config: &HeightmapConfig) -> Result<TiffEncoder<W>> {
        let encoder = TiffEncoder::new(sink)
            .map_err(|e| ReliefError::EncodeError(e.to_string()))?
            .with_compression(Self::compression(config));
        Ok(encoder)
    }

    fn dimensions(field: &ThicknessField) -> Result<(u32, u32)> {
        let w = u32::try_from(field.width)
            .map_err(|_| ReliefError::InvalidDimensions(format!("width {} exceeds TIFF limits", field.width)))?;
        let h = u32::try_from(field.height)
            .map_err(|_| ReliefError::InvalidDimensions(format!("height {} exceeds TIFF limits", field.height)))?;
        Ok((w, h))
    }
}

impl HeightmapWriter for TiffHeightmapWriter {
    fn write_preview(&self, field: &ThicknessField, output: &mut dyn Write, config: &HeightmapConfig) -> Result<()> {
        debug!("Encoding 16-bit preview: {}x{} ({:?})", field.width, field.height, config.preview_scale);

        let (width, height) = Self::dimensions(field)?;
        let gray = preview_gray16(field, config.preview_scale);
        let mut buffer = Vec::new();

        {
            let mut encoder = Self::encoder(Cursor::new(&mut buffer), config)?;
            if config.predictor {
                encoder = encoder.with_predictor(Predictor::Horizontal);
            }

            encoder
                .write_image::<Gray16>(width, height, &gray)
                .map_err(|e| ReliefError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("Preview encoding complete, {} bytes", buffer.len());
        Ok(())
    }

    fn write_raw_mm(&self, field: &ThicknessField, output: &mut dyn Write, config: &HeightmapConfig) -> Result<()> {
        debug!("Encoding float thickness map: {}x{}", field.width, field.height);

        let (width, height) = Self::dimensions(field)?;
        let mut buffer = Vec::new();

        Self::encoder(Cursor::new(&mut buffer), config)?
            .write_image::<Gray32Float>(width, height, &field.data)
            .map_err(|e| ReliefError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("Float map encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

use tracing::{debug, instrument};

use crate::relief_pipeline::common::error::{Result, ReliefError};
use crate::relief_pipeline::raster::types::RasterImage;
use crate::relief_pipeline::thickness::luminance::{linear_table, luminance_with, tone_map};
use crate::relief_pipeline::thickness::params::ReliefParams;
use crate::relief_pipeline::thickness::types::ThicknessField;

/// Maps a raster to a thickness field under a fixed set of parameters.
pub struct ThicknessFieldBuilder {
    params: ReliefParams,
}

impl ThicknessFieldBuilder {
    pub fn new(params: ReliefParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Resamples `image` to the target width and converts each pixel to a
    /// thickness in millimetres.
    ///
    /// Flips are applied while writing, so the returned field is already in
    /// its final orientation.
    #[instrument(skip(self, image), fields(src_width = image.width, src_height = image.height))]
    pub fn build(&self, image: &RasterImage) -> Result<ThicknessField> {
        let p = &self.params;

        if image.width == 0 || image.height == 0 {
            return Err(ReliefError::InvalidParameter(format!(
                "source image must not be empty, got {}x{}",
                image.width, image.height
            )));
        }

        let width = p.target_width_px as usize;
        let height = image.scaled_height(width);
        let px_mm = p.px_mm(width);

        let resampled = image.resampled(width, height)?;

        debug!(
            width,
            height,
            px_mm,
            invert = p.invert,
            flip_x = p.flip_x,
            flip_y = p.flip_y,
            "Building thickness field"
        );

        let table = linear_table();
        let mut data = vec![0.0f32; width * height];

        for (i, rgba) in resampled.pixels().enumerate() {
            let (x, y) = (i % width, i / width);

            let y_lin = luminance_with(&table, rgba);
            let toned = tone_map(y_lin, p.black_cut, p.white_cut, p.tone_gamma);
            let v = if p.invert { 1.0 - toned } else { toned };
            let t = p.base_mm + p.relief_mm * v;

            let dst_x = if p.flip_x { width - 1 - x } else { x };
            let dst_y = if p.flip_y { height - 1 - y } else { y };
            data[dst_y * width + dst_x] = t as f32;
        }

        ThicknessField::new(width, height, px_mm, data)
    }
}

/// One-shot form of [`ThicknessFieldBuilder::build`].
pub fn build_thickness_field(image: &RasterImage, params: &ReliefParams) -> Result<ThicknessField> {
    ThicknessFieldBuilder::new(params.clone())?.build(image)
}
